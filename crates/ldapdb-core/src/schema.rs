//! Model descriptions: which fields a record has, how they map to directory
//! attributes and where its entries live.

mod field;
pub use field::{Field, FieldTy};

mod keys;
pub use keys::Keys;

mod model;
pub use model::{Model, ModelBuilder};

mod scope;
pub use scope::SearchScope;
