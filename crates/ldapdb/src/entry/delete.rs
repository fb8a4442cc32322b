use super::Entry;
use crate::{db::Db, driver::operation::DeleteEntry, signal::PostDelete, Model, Result};

use tracing::debug;

impl<M: Model> Entry<M> {
    /// Deletes the stored entry.
    ///
    /// The record keeps its DN and saved primary key afterwards. Call
    /// [`Entry::detach`] before saving it again to add a new entry.
    pub async fn delete(&self, db: &Db) -> Result<()> {
        self.delete_impl(db, None).await
    }

    /// Like [`Entry::delete`], through the connection registered as `alias`.
    pub async fn delete_using(&self, db: &Db, alias: &str) -> Result<()> {
        self.delete_impl(db, Some(alias)).await
    }

    async fn delete_impl(&self, db: &Db, using: Option<&str>) -> Result<()> {
        let alias = db.resolve_alias(&self.schema, &self.variant, using, Some(&self.dn));
        let connection = db.connection(&alias).await?;

        debug!(dn = %self.dn, "Deleting LDAP entry");
        connection
            .lock()
            .await
            .exec(
                DeleteEntry {
                    dn: self.dn.clone(),
                }
                .into(),
            )
            .await?;

        db.signals().post_delete(&PostDelete {
            model: &self.schema,
            dn: &self.dn,
            record: &self.record,
        });

        Ok(())
    }
}
