use super::{Field, Keys, SearchScope};
use crate::{dn, Error, Result, Value};

/// Describes a record type stored in the directory.
#[derive(Debug, Clone)]
pub struct Model {
    /// Name of the model, used in log and error messages
    pub name: String,

    /// Fields in declaration order
    pub fields: Vec<Field>,

    /// Object classes attached to new entries
    pub object_classes: Vec<String>,

    /// DN suffix under which the model's entries live
    pub base_dn: String,

    /// Scope of primary-key lookups below `base_dn`
    pub search_scope: SearchScope,

    /// Connection alias the model always uses, if any
    pub bound_alias: Option<String>,

    /// Index of the primary-key field in `fields`
    primary_key: usize,
}

impl Model {
    pub fn builder(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder {
            name: name.into(),
            fields: vec![],
            object_classes: vec!["top".to_string()],
            base_dn: String::new(),
            search_scope: SearchScope::default(),
            bound_alias: None,
        }
    }

    pub fn primary_key(&self) -> &Field {
        &self.fields[self.primary_key]
    }

    pub fn primary_key_index(&self) -> usize {
        self.primary_key
    }

    /// Fields that map to a directory attribute, with their index and
    /// attribute name.
    pub fn mapped_fields(&self) -> impl Iterator<Item = (usize, &Field, &str)> + '_ {
        self.fields
            .iter()
            .enumerate()
            .filter_map(|(index, field)| Some((index, field, field.attribute.as_deref()?)))
    }

    /// Attribute names requested when reading an entry back.
    pub fn attributes(&self) -> Vec<String> {
        self.mapped_fields()
            .map(|(_, _, attribute)| attribute.to_string())
            .collect()
    }

    /// Builds an RDN using only the given keys.
    ///
    /// Every key-bearing field must be covered, there is no record to take
    /// values from.
    pub fn rdn_from_keys(&self, keys: &Keys) -> Result<String> {
        self.format_rdn(|_, field| match keys.get(&field.name) {
            Some(value) => Ok(Some(value.clone())),
            None if field.primary_key => Err(Error::identity(format!(
                "all keys must be specified when building from `{}` without an instance; missing `{}`",
                self.name, field.name
            ))),
            None => Ok(None),
        })
    }

    /// Builds an RDN for a record, taking the primary key from `current`
    /// unless `keys` overrides it.
    pub fn rdn_from_record(&self, keys: &Keys, current: impl Fn(usize) -> Value) -> Result<String> {
        self.format_rdn(|index, field| match keys.get(&field.name) {
            Some(value) => Ok(Some(value.clone())),
            None if field.primary_key => Ok(Some(current(index))),
            None => Ok(None),
        })
    }

    fn format_rdn(
        &self,
        mut value_for: impl FnMut(usize, &Field) -> Result<Option<Value>>,
    ) -> Result<String> {
        let mut bits = vec![];

        for (index, field, attribute) in self.mapped_fields() {
            let Some(value) = value_for(index, field)? else {
                continue;
            };
            let value = dn::rdn_value(&field.name, &value)?;
            bits.push(format!("{attribute}={}", dn::escape_value(&value)));
        }

        if bits.is_empty() {
            return Err(Error::identity(format!(
                "model `{}` has no mapped key field",
                self.name
            )));
        }

        Ok(bits.join("+"))
    }
}

/// Builds and validates a [`Model`].
#[derive(Debug)]
pub struct ModelBuilder {
    name: String,
    fields: Vec<Field>,
    object_classes: Vec<String>,
    base_dn: String,
    search_scope: SearchScope,
    bound_alias: Option<String>,
}

impl ModelBuilder {
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn object_classes<I, S>(mut self, object_classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.object_classes = object_classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn base_dn(mut self, base_dn: impl Into<String>) -> Self {
        self.base_dn = base_dn.into();
        self
    }

    pub fn search_scope(mut self, search_scope: SearchScope) -> Self {
        self.search_scope = search_scope;
        self
    }

    pub fn bound_alias(mut self, alias: impl Into<String>) -> Self {
        self.bound_alias = Some(alias.into());
        self
    }

    pub fn build(self) -> Result<Model> {
        let mut primary_key = None;

        for (index, field) in self.fields.iter().enumerate() {
            if self.fields[..index].iter().any(|f| f.name == field.name) {
                return Err(Error::invalid_schema(format!(
                    "model `{}` declares field `{}` twice",
                    self.name, field.name
                )));
            }

            if field.primary_key {
                if primary_key.is_some() {
                    return Err(Error::invalid_schema(format!(
                        "model `{}` declares more than one primary key",
                        self.name
                    )));
                }
                primary_key = Some(index);
            }
        }

        let Some(primary_key) = primary_key else {
            return Err(Error::invalid_schema(format!(
                "model `{}` declares no primary key",
                self.name
            )));
        };

        Ok(Model {
            name: self.name,
            fields: self.fields,
            object_classes: self.object_classes,
            base_dn: self.base_dn,
            search_scope: self.search_scope,
            bound_alias: self.bound_alias,
            primary_key,
        })
    }
}
