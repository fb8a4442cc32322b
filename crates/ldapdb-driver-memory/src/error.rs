use thiserror::Error;

/// Failures reported by the in-memory directory, mirroring LDAP result codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("no such object: {0}")]
    NoSuchObject(String),

    #[error("entry already exists: {0}")]
    AlreadyExists(String),

    #[error("no such attribute `{attribute}` on {dn}")]
    NoSuchAttribute { dn: String, attribute: String },

    #[error("operation not allowed on non-leaf entry: {0}")]
    NotAllowedOnNonLeaf(String),

    #[error("invalid DN syntax: {0}")]
    InvalidDnSyntax(String),

    #[error("connection is unbound")]
    Unbound,
}

impl MemoryError {
    /// LDAP result code for this failure.
    pub fn rc(&self) -> u32 {
        match self {
            MemoryError::NoSuchAttribute { .. } => 16,
            MemoryError::NoSuchObject(_) => 32,
            MemoryError::InvalidDnSyntax(_) => 34,
            MemoryError::NotAllowedOnNonLeaf(_) => 66,
            MemoryError::AlreadyExists(_) => 68,
            MemoryError::Unbound => 80,
        }
    }
}

impl From<MemoryError> for ldapdb_core::Error {
    fn from(err: MemoryError) -> Self {
        ldapdb_core::Error::directory_operation_failed(err)
    }
}
