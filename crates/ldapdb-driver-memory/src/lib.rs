//! An in-process directory for tests and local development.
//!
//! All connections opened from one [`Memory`] driver share the same tree.
//! Binds always succeed and parent entries are not required to exist.

mod dit;
use dit::Dit;

mod error;
pub use error::MemoryError;

use ldapdb_core::{
    async_trait,
    driver::{Connection, DirEntry, Driver, Operation, Response},
    ConnectionConfig, Result,
};
use std::sync::{Arc, Mutex};
use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct Memory {
    dit: Arc<Mutex<Dit>>,
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }

    /// Returns a copy of the entry at `dn`, if any.
    pub fn entry(&self, dn: &str) -> Option<DirEntry> {
        self.dit.lock().unwrap().get(dn).cloned()
    }

    /// Number of entries in the tree.
    pub fn len(&self) -> usize {
        self.dit.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Driver for Memory {
    async fn connect(&self, config: &ConnectionConfig) -> Result<Box<dyn Connection>> {
        trace!(url = %config.url, bind_dn = ?config.bind_dn, "binding to memory directory");

        Ok(Box::new(MemoryConnection {
            dit: Some(self.dit.clone()),
            bind_dn: config.bind_dn.clone(),
        }))
    }
}

#[derive(Debug)]
pub struct MemoryConnection {
    /// `None` once unbound
    dit: Option<Arc<Mutex<Dit>>>,

    bind_dn: Option<String>,
}

impl MemoryConnection {
    /// DN the connection is bound as; `None` for an anonymous bind.
    pub fn bind_dn(&self) -> Option<&str> {
        self.bind_dn.as_deref()
    }
}

#[async_trait]
impl Connection for MemoryConnection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        let Some(dit) = &self.dit else {
            return Err(MemoryError::Unbound.into());
        };

        trace!(?op, "memory directory operation");
        let mut dit = dit.lock().unwrap();

        match op {
            Operation::AddEntry(op) => dit.add(op)?,
            Operation::DeleteEntry(op) => dit.delete(op)?,
            Operation::FindByKey(op) => return Ok(Response::Entries(dit.find_by_key(&op)?)),
            Operation::ModifyEntry(op) => dit.modify(op)?,
            Operation::RenameEntry(op) => dit.rename(op)?,
        }

        Ok(Response::Done)
    }

    async fn unbind(&mut self) -> Result<()> {
        self.dit = None;
        Ok(())
    }
}
