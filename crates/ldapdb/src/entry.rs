mod delete;
mod save;

use crate::{
    codec, dn,
    driver::{operation::FindByKey, Connection},
    handle::Variant,
    schema, Error, Keys, Model, Result, Value, ValueRecord,
};

use ldapdb_core::bail;
use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
};

/// A record of model `M` paired with the directory entry it is stored as.
///
/// `Entry` dereferences to the record, so fields are read and assigned
/// directly. Nothing is sent to the directory until [`Entry::save`] or
/// [`Entry::delete`].
pub struct Entry<M> {
    record: M,

    /// DN of the stored entry. Empty until the record is first saved.
    dn: String,

    /// Primary key the record had when last loaded or saved. Used to read
    /// back the stored entry when computing changes.
    saved_pk: Value,

    schema: Arc<schema::Model>,
    variant: Variant,
}

impl<M: Model> Entry<M> {
    pub(crate) fn new(record: M, schema: Arc<schema::Model>, variant: Variant) -> Entry<M> {
        let saved_pk = record.get(schema.primary_key_index());
        Entry {
            record,
            dn: String::new(),
            saved_pk,
            schema,
            variant,
        }
    }

    pub(crate) fn loaded(
        (dn, record): (String, M),
        schema: Arc<schema::Model>,
        variant: Variant,
    ) -> Entry<M> {
        Entry {
            dn,
            ..Entry::new(record, schema, variant)
        }
    }

    /// DN of the stored entry, or `""` if the record was never saved.
    pub fn dn(&self) -> &str {
        &self.dn
    }

    pub fn saved_pk(&self) -> &Value {
        &self.saved_pk
    }

    /// Current value of the primary-key field.
    pub fn pk(&self) -> Value {
        self.record.get(self.schema.primary_key_index())
    }

    pub fn schema(&self) -> &schema::Model {
        &self.schema
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    pub fn base_dn(&self) -> &str {
        self.variant.base_dn(&self.schema)
    }

    /// Builds the entry's RDN from its current values. Fields named in `keys`
    /// take the given value instead.
    pub fn build_rdn(&self, keys: &Keys) -> Result<String> {
        self.schema
            .rdn_from_record(keys, |index| self.record.get(index))
    }

    pub fn build_dn(&self, keys: &Keys) -> Result<String> {
        Ok(dn::join(&self.build_rdn(keys)?, self.base_dn()))
    }

    /// Forgets the stored entry so the next save adds a new one.
    pub fn detach(&mut self) {
        self.dn.clear();
    }

    pub fn into_inner(self) -> M {
        self.record
    }
}

impl<M> Deref for Entry<M> {
    type Target = M;

    fn deref(&self) -> &M {
        &self.record
    }
}

impl<M> DerefMut for Entry<M> {
    fn deref_mut(&mut self) -> &mut M {
        &mut self.record
    }
}

impl<M: std::fmt::Debug> std::fmt::Debug for Entry<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("dn", &self.dn)
            .field("saved_pk", &self.saved_pk)
            .field("record", &self.record)
            .finish()
    }
}

/// Reads the entry of `model` whose primary key is `pk`, below `base_dn`.
pub(crate) async fn find<M: Model>(
    connection: &mut dyn Connection,
    model: &schema::Model,
    base_dn: &str,
    pk: &Value,
) -> Result<(String, M)> {
    let field = model.primary_key();
    let Some(attribute) = &field.attribute else {
        return Err(Error::identity(format!(
            "primary key `{}` of `{}` is not mapped to an attribute",
            field.name, model.name
        )));
    };

    let value = match codec::encode(field, pk)?.into_iter().next() {
        Some(value) if !pk.is_empty() => value,
        _ => {
            return Err(Error::identity(format!(
                "primary key `{}` of `{}` has no value",
                field.name, model.name
            )))
        }
    };

    let mut entries = connection
        .exec(
            FindByKey {
                base_dn: base_dn.to_string(),
                scope: model.search_scope,
                object_classes: model.object_classes.clone(),
                attribute: attribute.clone(),
                value,
                attributes: model.attributes(),
            }
            .into(),
        )
        .await?
        .into_entries()?;

    let mut entry = match entries.len() {
        1 => entries.swap_remove(0),
        0 => {
            return Err(Error::record_not_found(format!(
                "{} with {attribute}={pk:?} below `{base_dn}`",
                model.name
            )))
        }
        n => bail!(
            "{n} entries of `{}` match {attribute}={pk:?} below `{base_dn}`",
            model.name
        ),
    };

    let values = model
        .fields
        .iter()
        .map(|field| match &field.attribute {
            Some(attribute) => codec::decode(field, entry.take(attribute)),
            None => Ok(Value::Null),
        })
        .collect::<Result<Vec<_>>>()?;

    let record = M::load(ValueRecord::from_vec(values))?;
    Ok((entry.dn, record))
}
