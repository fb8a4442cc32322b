use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyEntry {
    /// DN of the entry to modify
    pub dn: String,

    /// Modifications, applied in order
    pub modifications: Vec<Modification>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modification {
    /// Replace all values of the attribute
    Replace(String, Vec<Vec<u8>>),

    /// Remove the attribute entirely
    Delete(String),
}

impl Modification {
    pub fn attribute(&self) -> &str {
        match self {
            Modification::Replace(attribute, _) | Modification::Delete(attribute) => attribute,
        }
    }
}

impl From<ModifyEntry> for Operation {
    fn from(value: ModifyEntry) -> Self {
        Self::ModifyEntry(value)
    }
}
