use indexmap::IndexMap;

/// A directory entry as read from the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirEntry {
    pub dn: String,

    /// Attribute values keyed by attribute name, as returned by the server
    pub attributes: IndexMap<String, Vec<Vec<u8>>>,
}

impl DirEntry {
    pub fn new(dn: impl Into<String>) -> DirEntry {
        DirEntry {
            dn: dn.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Values of `attribute`, matched case-insensitively.
    pub fn get(&self, attribute: &str) -> Option<&Vec<Vec<u8>>> {
        self.attributes
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(attribute))
            .map(|(_, values)| values)
    }

    /// Removes and returns the values of `attribute`, matched
    /// case-insensitively.
    pub fn take(&mut self, attribute: &str) -> Vec<Vec<u8>> {
        let index = self
            .attributes
            .keys()
            .position(|name| name.eq_ignore_ascii_case(attribute));

        index
            .and_then(|index| self.attributes.shift_remove_index(index))
            .map(|(_, values)| values)
            .unwrap_or_default()
    }
}
