mod add_entry;
pub use add_entry::AddEntry;

mod delete_entry;
pub use delete_entry::DeleteEntry;

mod find_by_key;
pub use find_by_key::FindByKey;

mod modify_entry;
pub use modify_entry::{Modification, ModifyEntry};

mod rename_entry;
pub use rename_entry::RenameEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Create a new entry
    AddEntry(AddEntry),

    /// Delete the entry at a DN
    DeleteEntry(DeleteEntry),

    /// Look up entries by the value of their key attribute
    FindByKey(FindByKey),

    /// Apply attribute modifications to an entry
    ModifyEntry(ModifyEntry),

    /// Replace an entry's RDN, keeping its parent
    RenameEntry(RenameEntry),
}

impl Operation {
    /// The DN the operation targets.
    pub fn dn(&self) -> &str {
        match self {
            Operation::AddEntry(op) => &op.dn,
            Operation::DeleteEntry(op) => &op.dn,
            Operation::FindByKey(op) => &op.base_dn,
            Operation::ModifyEntry(op) => &op.dn,
            Operation::RenameEntry(op) => &op.dn,
        }
    }
}
