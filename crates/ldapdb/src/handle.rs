use crate::{
    db::Db,
    dn,
    entry::{self, Entry},
    schema, Error, Keys, Model, Result, Value,
};

use std::{marker::PhantomData, sync::Arc};
use tracing::debug;

/// Routing overrides a [`Handle`] applies to every entry it produces.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Connection alias used instead of the model's routing
    pub bound_alias: Option<String>,

    /// DN suffix used instead of the model's `base_dn`
    pub base_dn: Option<String>,
}

impl Variant {
    pub(crate) fn base_dn<'a>(&'a self, model: &'a schema::Model) -> &'a str {
        self.base_dn.as_deref().unwrap_or(&model.base_dn)
    }
}

/// Entry point for working with entries of model `M`.
///
/// A handle pairs the model's description with a [`Variant`]. The variant
/// factories ([`Handle::scoped`], [`Handle::bind_as`]) return new handles and
/// leave `self` untouched.
pub struct Handle<M> {
    schema: Arc<schema::Model>,
    variant: Variant,
    _p: PhantomData<fn() -> M>,
}

impl<M: Model> Handle<M> {
    pub fn new() -> Result<Handle<M>> {
        Ok(Handle {
            schema: Arc::new(M::schema().build()?),
            variant: Variant::default(),
            _p: PhantomData,
        })
    }

    pub fn schema(&self) -> &schema::Model {
        &self.schema
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    /// DN suffix of entries created through this handle.
    pub fn base_dn(&self) -> &str {
        self.variant.base_dn(&self.schema)
    }

    /// Builds an RDN from `keys` alone.
    ///
    /// Fails with an identity error unless `keys` covers the primary key.
    pub fn build_rdn(&self, keys: &Keys) -> Result<String> {
        self.schema.rdn_from_keys(keys)
    }

    /// Builds the DN an entry with the given keys has under this handle.
    pub fn build_dn(&self, keys: &Keys) -> Result<String> {
        Ok(dn::join(&self.build_rdn(keys)?, self.base_dn()))
    }

    /// Returns a handle addressing the same model below `base_dn`.
    pub fn scoped(&self, base_dn: impl Into<String>) -> Handle<M> {
        Handle {
            schema: self.schema.clone(),
            variant: Variant {
                base_dn: Some(base_dn.into()),
                ..self.variant.clone()
            },
            _p: PhantomData,
        }
    }

    /// Returns a handle whose entries go through `alias`, bound as another
    /// directory user.
    ///
    /// When `alias` is not registered yet, its config is copied from the
    /// alias this handle resolves to. The bind DN is `dn` when given,
    /// otherwise the DN built from `keys`. A missing password binds with the
    /// empty password.
    pub fn bind_as(
        &self,
        db: &Db,
        alias: &str,
        dn: Option<&str>,
        password: Option<&str>,
        keys: &Keys,
    ) -> Result<Handle<M>> {
        let bind_dn = match dn {
            Some(dn) => dn.to_string(),
            None => self.build_dn(keys)?,
        };

        let registry = db.registry();
        let mut config = match registry.config(alias) {
            Some(config) => config,
            None => {
                let base_alias = db.resolve_alias(&self.schema, &self.variant, None, None);
                registry.config(&base_alias).ok_or_else(|| {
                    Error::invalid_connection_config(format!(
                        "cannot bind `{alias}`: no connection registered under alias `{base_alias}`"
                    ))
                })?
            }
        };

        config.bind_dn = Some(bind_dn);
        config.password = Some(password.unwrap_or_default().to_string());

        let registered = registry.register(alias, config);
        debug!(alias = %alias, ?registered, "Bound connection alias");

        Ok(Handle {
            schema: self.schema.clone(),
            variant: Variant {
                bound_alias: Some(alias.to_string()),
                ..self.variant.clone()
            },
            _p: PhantomData,
        })
    }

    /// Wraps a new, unsaved record. Saving it adds an entry.
    pub fn entry(&self, record: M) -> Entry<M> {
        Entry::new(record, self.schema.clone(), self.variant.clone())
    }

    /// Loads the entry whose primary key is `pk`.
    ///
    /// Searches below the handle's base DN with the model's search scope.
    pub async fn get(&self, db: &Db, pk: impl Into<Value>) -> Result<Entry<M>> {
        let pk = pk.into();
        let alias = db.resolve_read_alias(&self.schema, &self.variant);
        let connection = db.connection(&alias).await?;
        let mut connection = connection.lock().await;

        let record =
            entry::find::<M>(&mut **connection, &self.schema, self.base_dn(), &pk).await?;
        Ok(Entry::loaded(record, self.schema.clone(), self.variant.clone()))
    }

    /// Like [`Handle::get`], returning `None` when no entry matches.
    pub async fn find(&self, db: &Db, pk: impl Into<Value>) -> Result<Option<Entry<M>>> {
        match self.get(db, pk).await {
            Ok(entry) => Ok(Some(entry)),
            Err(err) if err.is_record_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}

impl<M> Clone for Handle<M> {
    fn clone(&self) -> Self {
        Handle {
            schema: self.schema.clone(),
            variant: self.variant.clone(),
            _p: PhantomData,
        }
    }
}

impl<M> std::fmt::Debug for Handle<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("model", &self.schema.name)
            .field("variant", &self.variant)
            .finish()
    }
}
