use crate::schema;

/// Picks a connection alias for a model when neither the caller, the handle
/// nor the model names one.
///
/// Returning `None` falls through to the `default` alias.
pub trait Router: Send + Sync + 'static {
    /// Alias to write through. `dn` is set when an existing entry is written.
    fn db_for_write(&self, model: &schema::Model, dn: Option<&str>) -> Option<String> {
        let _ = (model, dn);
        None
    }

    /// Alias to read through. Falls back to [`Router::db_for_write`] when
    /// `None`.
    fn db_for_read(&self, model: &schema::Model) -> Option<String> {
        let _ = model;
        None
    }
}

/// Routes everything to the `default` alias.
#[derive(Debug, Default)]
pub struct DefaultRouter;

impl Router for DefaultRouter {}

impl<F> Router for F
where
    F: Fn(&schema::Model) -> Option<String> + Send + Sync + 'static,
{
    fn db_for_write(&self, model: &schema::Model, _dn: Option<&str>) -> Option<String> {
        self(model)
    }
}
