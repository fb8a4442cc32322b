use super::{Connect, Db, DefaultRouter, Registry, Router, Shared};
use crate::{
    signal::{PostDelete, PostSave, Signals},
    ConnectionConfig, Result, Settings,
};

use ldapdb_core::driver::Driver;
use std::sync::Arc;

#[derive(Default)]
pub struct Builder {
    /// Connection configs, by alias
    settings: Settings,

    router: Option<Box<dyn Router>>,

    signals: Signals,
}

impl Builder {
    /// Registers a connection config under `alias`.
    pub fn connection(&mut self, alias: impl Into<String>, config: ConnectionConfig) -> &mut Self {
        self.settings.connections.insert(alias.into(), config);
        self
    }

    /// Registers every connection in `settings`.
    pub fn settings(&mut self, settings: Settings) -> &mut Self {
        self.settings.connections.extend(settings.connections);
        self
    }

    pub fn router(&mut self, router: impl Router) -> &mut Self {
        self.router = Some(Box::new(router));
        self
    }

    /// Adds an observer called after every successful save.
    pub fn on_post_save<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&PostSave<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.signals.on_post_save(Box::new(f));
        self
    }

    /// Adds an observer called after every successful delete.
    pub fn on_post_delete<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&PostDelete<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.signals.on_post_delete(Box::new(f));
        self
    }

    /// Builds a `Db` that picks drivers by URL scheme.
    pub fn connect(&mut self) -> Db {
        self.build(Connect::new())
    }

    /// Builds a `Db` that opens every connection through `driver`.
    ///
    /// No connection is opened until an operation needs one.
    pub fn build(&mut self, driver: impl Driver) -> Db {
        let settings = std::mem::take(&mut self.settings);

        Db {
            shared: Arc::new(Shared {
                driver: Box::new(driver),
                registry: Registry::from_settings(settings),
                router: self
                    .router
                    .take()
                    .unwrap_or_else(|| Box::new(DefaultRouter)),
                signals: std::mem::take(&mut self.signals),
            }),
        }
    }
}
