use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddEntry {
    /// DN of the new entry
    pub dn: String,

    /// Attributes of the new entry, `objectClass` first
    pub attributes: Vec<(String, Vec<Vec<u8>>)>,
}

impl From<AddEntry> for Operation {
    fn from(value: AddEntry) -> Self {
        Self::AddEntry(value)
    }
}
