pub mod codec;

pub mod config;
pub use config::{ConnectionConfig, Settings};

pub mod dn;

pub mod driver;
pub use driver::{Connection, Driver};

mod error;
pub use error::Error;

pub mod schema;

pub mod value;
pub use value::{Value, ValueRecord};

/// A Result type alias that uses ldapdb's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
