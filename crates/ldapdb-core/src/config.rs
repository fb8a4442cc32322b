use crate::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use url::Url;

/// How to reach and bind to a directory server.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Server URL, e.g. `ldap://localhost:389`. The scheme selects the driver.
    pub url: Url,

    /// DN to bind as. Anonymous bind when unset.
    #[serde(default)]
    pub bind_dn: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Connect timeout, in seconds. Drivers without a network leg ignore it.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

impl ConnectionConfig {
    pub fn new(url: &str) -> Result<ConnectionConfig> {
        Ok(ConnectionConfig {
            url: Url::parse(url)?,
            bind_dn: None,
            password: None,
            connect_timeout_secs: None,
        })
    }

    pub fn with_credentials(
        mut self,
        bind_dn: impl Into<String>,
        password: impl Into<String>,
    ) -> ConnectionConfig {
        self.bind_dn = Some(bind_dn.into());
        self.password = Some(password.into());
        self
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("url", &self.url.as_str())
            .field("bind_dn", &self.bind_dn)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

/// Named connection configs, keyed by alias.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    pub connections: IndexMap<String, ConnectionConfig>,
}
