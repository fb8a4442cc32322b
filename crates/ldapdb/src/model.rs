use crate::{schema, Result, Value, ValueRecord};

/// A record type stored as directory entries.
///
/// Field indices are positions in the description returned by
/// [`Model::schema`].
pub trait Model: Sized + Send + Sync + 'static {
    /// Describes the model's fields, object classes and base DN.
    fn schema() -> schema::ModelBuilder;

    /// Returns the current value of the field at `index`.
    fn get(&self, index: usize) -> Value;

    /// Builds an instance from decoded field values. Fields without an
    /// attribute mapping are `Null`.
    fn load(record: ValueRecord) -> Result<Self>;
}
