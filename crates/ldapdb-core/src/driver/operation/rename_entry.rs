use super::*;

/// Moves an entry to a new RDN under the same parent. The old RDN values are
/// removed from the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEntry {
    /// Current DN of the entry
    pub dn: String,

    /// New RDN
    pub new_rdn: String,
}

impl From<RenameEntry> for Operation {
    fn from(value: RenameEntry) -> Self {
        Self::RenameEntry(value)
    }
}
