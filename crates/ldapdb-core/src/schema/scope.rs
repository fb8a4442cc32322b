use serde::{Deserialize, Serialize};

/// How far below the base DN a point lookup searches.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Only the base entry itself
    Base,

    /// Immediate children of the base entry
    OneLevel,

    /// The base entry and everything below it
    #[default]
    Subtree,
}
