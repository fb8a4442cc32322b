use super::SharedConnection;
use crate::{ConnectionConfig, Error, Result, Settings};

use indexmap::IndexMap;
use ldapdb_core::driver::Driver;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

/// Named connection configs and the connections opened from them.
///
/// Connections are opened lazily, on the first operation routed through an
/// alias, and cached until the alias is unbound or its config replaced.
#[derive(Debug, Default)]
pub struct Registry {
    slots: Mutex<IndexMap<String, Slot>>,
}

#[derive(Debug)]
struct Slot {
    config: ConnectionConfig,
    connection: Option<SharedConnection>,
}

/// Outcome of [`Registry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registered {
    /// The alias was unknown and now maps to the config
    Inserted,

    /// The alias already maps to an identical config; nothing changed
    Reused,

    /// The alias mapped to a different config, which was replaced. Its cached
    /// connection, if any, was dropped without an unbind.
    Replaced,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    pub fn from_settings(settings: Settings) -> Registry {
        let registry = Registry::new();
        for (alias, config) in settings.connections {
            registry.register(alias, config);
        }
        registry
    }

    /// Maps `alias` to `config`.
    ///
    /// Registering is idempotent: an identical config keeps the alias and its
    /// open connection untouched.
    pub fn register(&self, alias: impl Into<String>, config: ConnectionConfig) -> Registered {
        let alias = alias.into();
        let mut slots = self.slots.lock().unwrap();

        match slots.get_mut(&alias) {
            Some(slot) if slot.config == config => Registered::Reused,
            Some(slot) => {
                debug!(alias = %alias, "Replacing connection config");
                slot.config = config;
                slot.connection = None;
                Registered::Replaced
            }
            None => {
                debug!(alias = %alias, "Registering connection config");
                slots.insert(
                    alias,
                    Slot {
                        config,
                        connection: None,
                    },
                );
                Registered::Inserted
            }
        }
    }

    /// Returns a copy of the config registered under `alias`.
    pub fn config(&self, alias: &str) -> Option<ConnectionConfig> {
        let slots = self.slots.lock().unwrap();
        slots.get(alias).map(|slot| slot.config.clone())
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.slots.lock().unwrap().contains_key(alias)
    }

    /// Registered aliases, in registration order.
    pub fn aliases(&self) -> Vec<String> {
        self.slots.lock().unwrap().keys().cloned().collect()
    }

    /// Returns `true` if `alias` has an open, cached connection.
    pub fn is_connected(&self, alias: &str) -> bool {
        let slots = self.slots.lock().unwrap();
        slots
            .get(alias)
            .is_some_and(|slot| slot.connection.is_some())
    }

    pub(crate) async fn connection(
        &self,
        alias: &str,
        driver: &dyn Driver,
    ) -> Result<SharedConnection> {
        let config = {
            let slots = self.slots.lock().unwrap();
            let Some(slot) = slots.get(alias) else {
                return Err(Error::invalid_connection_config(format!(
                    "no connection registered under alias `{alias}`"
                )));
            };

            if let Some(connection) = &slot.connection {
                return Ok(connection.clone());
            }

            slot.config.clone()
        };

        // Connect without holding the lock
        let connection = Arc::new(AsyncMutex::new(driver.connect(&config).await?));

        let mut slots = self.slots.lock().unwrap();
        match slots.get_mut(alias) {
            // Another task connected first; use its connection
            Some(Slot {
                connection: Some(existing),
                config: current,
            }) if *current == config => Ok(existing.clone()),
            Some(slot) if slot.config == config => {
                slot.connection = Some(connection.clone());
                Ok(connection)
            }
            // The config changed while connecting; don't cache a stale connection
            _ => Ok(connection),
        }
    }

    pub(crate) fn take_connection(&self, alias: &str) -> Option<SharedConnection> {
        let mut slots = self.slots.lock().unwrap();
        slots.get_mut(alias)?.connection.take()
    }
}
