mod builder;
pub use builder::Builder;

mod connect;
pub use connect::Connect;

mod registry;
pub use registry::{Registered, Registry};

mod router;
pub use router::{DefaultRouter, Router};

use crate::{handle::Variant, schema, signal::Signals, Result};

use ldapdb_core::driver::{Connection, Driver};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Alias used when nothing else selects a connection.
pub const DEFAULT_ALIAS: &str = "default";

/// A connection shared by every entry that resolves to the same alias.
pub(crate) type SharedConnection = Arc<Mutex<Box<dyn Connection>>>;

/// Shared state between all `Db` clones.
struct Shared {
    driver: Box<dyn Driver>,
    registry: Registry,
    router: Box<dyn Router>,
    signals: Signals,
}

/// Handle to a set of named directory connections.
///
/// Cloning is cheap; clones share connections, the router and observers.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.shared.registry
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.shared.driver
    }

    pub(crate) fn signals(&self) -> &Signals {
        &self.shared.signals
    }

    /// Picks the alias an operation on `model` goes through.
    ///
    /// An explicit `using` wins, then the variant's bound alias, then the
    /// model's own bound alias, then the router. `dn` is the entry's DN when
    /// an instance is being written.
    pub(crate) fn resolve_alias(
        &self,
        model: &schema::Model,
        variant: &Variant,
        using: Option<&str>,
        dn: Option<&str>,
    ) -> String {
        using
            .or(variant.bound_alias.as_deref())
            .or(model.bound_alias.as_deref())
            .map(str::to_string)
            .or_else(|| self.shared.router.db_for_write(model, dn))
            .unwrap_or_else(|| DEFAULT_ALIAS.to_string())
    }

    /// Like [`Db::resolve_alias`], for reads through a model handle.
    pub(crate) fn resolve_read_alias(&self, model: &schema::Model, variant: &Variant) -> String {
        variant
            .bound_alias
            .as_deref()
            .or(model.bound_alias.as_deref())
            .map(str::to_string)
            .or_else(|| self.shared.router.db_for_read(model))
            .or_else(|| self.shared.router.db_for_write(model, None))
            .unwrap_or_else(|| DEFAULT_ALIAS.to_string())
    }

    /// Returns the connection for `alias`, connecting on first use.
    pub(crate) async fn connection(&self, alias: &str) -> Result<SharedConnection> {
        self.shared
            .registry
            .connection(alias, &*self.shared.driver)
            .await
    }

    /// Unbinds and drops the cached connection for `alias`.
    ///
    /// The next operation through `alias` reconnects.
    pub async fn unbind(&self, alias: &str) -> Result<()> {
        let Some(connection) = self.shared.registry.take_connection(alias) else {
            return Ok(());
        };

        debug!(alias = %alias, "Unbinding LDAP connection");
        let mut connection = connection.lock().await;
        connection.unbind().await
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("driver", &self.shared.driver)
            .field("registry", &self.shared.registry)
            .finish()
    }
}
