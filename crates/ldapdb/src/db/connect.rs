use crate::{ConnectionConfig, Error, Result};

use ldapdb_core::{
    async_trait,
    driver::{Connection, Driver},
};

/// Driver that picks the backend from the connection URL's scheme.
///
/// `ldap://`, `ldaps://` and `ldapi://` go to the `ldap3` driver, `memory://`
/// to the in-process directory. Every `memory://` alias served by one
/// `Connect` shares the same tree.
#[derive(Debug, Default)]
pub struct Connect {
    #[cfg(feature = "memory")]
    memory: ldapdb_driver_memory::Memory,
}

impl Connect {
    pub fn new() -> Connect {
        Connect::default()
    }
}

#[async_trait]
impl Driver for Connect {
    async fn connect(&self, config: &ConnectionConfig) -> Result<Box<dyn Connection>> {
        match config.url.scheme() {
            "ldap" | "ldaps" | "ldapi" => connect_ldap3(config).await,
            "memory" => self.connect_memory(config).await,
            scheme => Err(Error::invalid_connection_config(format!(
                "unsupported directory; scheme={scheme}; url={}",
                config.url
            ))),
        }
    }
}

impl Connect {
    #[cfg(feature = "memory")]
    async fn connect_memory(&self, config: &ConnectionConfig) -> Result<Box<dyn Connection>> {
        self.memory.connect(config).await
    }

    #[cfg(not(feature = "memory"))]
    async fn connect_memory(&self, _config: &ConnectionConfig) -> Result<Box<dyn Connection>> {
        Err(Error::invalid_connection_config("`memory` feature not enabled"))
    }
}

#[cfg(feature = "ldap3")]
async fn connect_ldap3(config: &ConnectionConfig) -> Result<Box<dyn Connection>> {
    ldapdb_driver_ldap3::Ldap3::new().connect(config).await
}

#[cfg(not(feature = "ldap3"))]
async fn connect_ldap3(_config: &ConnectionConfig) -> Result<Box<dyn Connection>> {
    Err(Error::invalid_connection_config("`ldap3` feature not enabled"))
}
