use super::*;
use crate::schema::SearchScope;

/// Equality lookup on a single attribute below a base DN, restricted to
/// entries carrying every listed object class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindByKey {
    pub base_dn: String,

    pub scope: SearchScope,

    /// Object classes the entry must carry
    pub object_classes: Vec<String>,

    /// Key attribute to match
    pub attribute: String,

    /// Encoded key value
    pub value: Vec<u8>,

    /// Attributes to return. `objectClass` is not requested implicitly.
    pub attributes: Vec<String>,
}

impl From<FindByKey> for Operation {
    fn from(value: FindByKey) -> Self {
        Self::FindByKey(value)
    }
}
