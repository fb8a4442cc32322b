use crate::Value;
use indexmap::IndexMap;

/// Field values used to build an RDN without an instance, or to override an
/// instance's own values.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Keys {
    values: IndexMap<String, Value>,
}

impl Keys {
    pub fn new() -> Keys {
        Keys::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Keys {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Keys
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut keys = Keys::new();
        for (name, value) in iter {
            keys.insert(name, value);
        }
        keys
    }
}
