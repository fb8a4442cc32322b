use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteEntry {
    /// DN of the entry to delete
    pub dn: String,
}

impl From<DeleteEntry> for Operation {
    fn from(value: DeleteEntry) -> Self {
        Self::DeleteEntry(value)
    }
}
