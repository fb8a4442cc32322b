mod entry;
pub use entry::DirEntry;

mod response;
pub use response::Response;

pub mod operation;
pub use operation::Operation;

use crate::{async_trait, ConnectionConfig, Result};

use std::fmt::Debug;

/// Opens connections to a directory server.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Connect and bind with the credentials in `config`.
    async fn connect(&self, config: &ConnectionConfig) -> Result<Box<dyn Connection>>;
}

/// A bound connection to a directory server.
#[async_trait]
pub trait Connection: Debug + Send + Sync + 'static {
    /// Execute a directory operation
    async fn exec(&mut self, op: Operation) -> Result<Response>;

    /// Close the connection. The connection must not be used afterwards.
    async fn unbind(&mut self) -> Result<()>;
}
