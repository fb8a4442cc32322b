//! Directory driver backed by the `ldap3` client.

use indexmap::IndexMap;
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, Mod, Scope, SearchEntry};
use ldapdb_core::{
    async_trait,
    driver::{
        operation::{AddEntry, FindByKey, Modification, ModifyEntry, RenameEntry},
        Connection, DirEntry, Driver, Operation, Response,
    },
    schema::SearchScope,
    ConnectionConfig, Error, Result,
};
use std::{collections::HashSet, time::Duration};
use tracing::{debug, info, warn};

#[derive(Debug, Default, Clone)]
pub struct Ldap3 {
    _priv: (),
}

impl Ldap3 {
    pub fn new() -> Ldap3 {
        Ldap3::default()
    }
}

#[async_trait]
impl Driver for Ldap3 {
    async fn connect(&self, config: &ConnectionConfig) -> Result<Box<dyn Connection>> {
        match config.url.scheme() {
            "ldap" | "ldaps" | "ldapi" => {}
            scheme => {
                return Err(Error::invalid_connection_config(format!(
                    "unsupported scheme `{scheme}` for the ldap3 driver"
                )))
            }
        }

        let mut settings = LdapConnSettings::new();
        if let Some(secs) = config.connect_timeout_secs {
            settings = settings.set_conn_timeout(Duration::from_secs(secs));
        }

        debug!(url = %config.url, "Connecting to LDAP server");
        let (conn, mut ldap) = LdapConnAsync::with_settings(settings, config.url.as_str())
            .await
            .map_err(Error::directory_operation_failed)?;

        // Spawn the connection driver
        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                warn!(error = %e, "LDAP connection driver error");
            }
        });

        if let Some(bind_dn) = &config.bind_dn {
            let password = config.password.as_deref().unwrap_or("");
            debug!(bind_dn = %bind_dn, "Performing LDAP bind");
            ldap.simple_bind(bind_dn, password)
                .await
                .and_then(|result| result.success())
                .map_err(Error::directory_operation_failed)?;
        }

        info!(url = %config.url, "LDAP connection established");
        Ok(Box::new(Ldap3Connection { ldap }))
    }
}

pub struct Ldap3Connection {
    ldap: Ldap,
}

impl std::fmt::Debug for Ldap3Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ldap3Connection").finish_non_exhaustive()
    }
}

impl Ldap3Connection {
    async fn add(&mut self, op: AddEntry) -> Result<()> {
        let attributes = op
            .attributes
            .into_iter()
            .map(|(name, values)| (name.into_bytes(), values.into_iter().collect::<HashSet<_>>()))
            .collect::<Vec<_>>();

        self.ldap
            .add(&op.dn, attributes)
            .await
            .and_then(|result| result.success())
            .map_err(Error::directory_operation_failed)?;
        Ok(())
    }

    async fn modify(&mut self, op: ModifyEntry) -> Result<()> {
        let mods = op
            .modifications
            .into_iter()
            .map(|modification| match modification {
                Modification::Replace(name, values) => {
                    Mod::Replace(name.into_bytes(), values.into_iter().collect())
                }
                Modification::Delete(name) => Mod::Delete(name.into_bytes(), HashSet::new()),
            })
            .collect::<Vec<_>>();

        self.ldap
            .modify(&op.dn, mods)
            .await
            .and_then(|result| result.success())
            .map_err(Error::directory_operation_failed)?;
        Ok(())
    }

    async fn rename(&mut self, op: RenameEntry) -> Result<()> {
        self.ldap
            .modifydn(&op.dn, &op.new_rdn, true, None)
            .await
            .and_then(|result| result.success())
            .map_err(Error::directory_operation_failed)?;
        Ok(())
    }

    async fn find_by_key(&mut self, op: FindByKey) -> Result<Vec<DirEntry>> {
        let scope = match op.scope {
            SearchScope::Base => Scope::Base,
            SearchScope::OneLevel => Scope::OneLevel,
            SearchScope::Subtree => Scope::Subtree,
        };
        let value = String::from_utf8_lossy(&op.value);
        let mut filter = String::from("(&");
        for class in &op.object_classes {
            filter.push_str(&format!("(objectClass={})", ldap3::ldap_escape(class)));
        }
        filter.push_str(&format!("({}={}))", op.attribute, ldap3::ldap_escape(value)));

        let (entries, _) = self
            .ldap
            .search(&op.base_dn, scope, &filter, op.attributes)
            .await
            .and_then(|result| result.success())
            .map_err(Error::directory_operation_failed)?;

        Ok(entries
            .into_iter()
            .map(|entry| {
                let entry = SearchEntry::construct(entry);
                let mut attributes = IndexMap::new();
                for (name, values) in entry.attrs {
                    attributes.insert(name, values.into_iter().map(String::into_bytes).collect());
                }
                for (name, values) in entry.bin_attrs {
                    attributes.insert(name, values);
                }
                DirEntry {
                    dn: entry.dn,
                    attributes,
                }
            })
            .collect())
    }
}

#[async_trait]
impl Connection for Ldap3Connection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::AddEntry(op) => self.add(op).await?,
            Operation::DeleteEntry(op) => {
                self.ldap
                    .delete(&op.dn)
                    .await
                    .and_then(|result| result.success())
                    .map_err(Error::directory_operation_failed)?;
            }
            Operation::FindByKey(op) => return Ok(Response::Entries(self.find_by_key(op).await?)),
            Operation::ModifyEntry(op) => self.modify(op).await?,
            Operation::RenameEntry(op) => self.rename(op).await?,
        }

        Ok(Response::Done)
    }

    async fn unbind(&mut self) -> Result<()> {
        self.ldap
            .unbind()
            .await
            .map_err(Error::directory_operation_failed)
    }
}
