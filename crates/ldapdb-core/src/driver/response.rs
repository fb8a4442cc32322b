use super::DirEntry;
use crate::{err, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The operation completed and returns nothing
    Done,

    /// Entries matched by a lookup
    Entries(Vec<DirEntry>),
}

impl Response {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn into_entries(self) -> Result<Vec<DirEntry>> {
        match self {
            Response::Entries(entries) => Ok(entries),
            _ => Err(err!("expected entries from the directory; response={self:?}")),
        }
    }
}
