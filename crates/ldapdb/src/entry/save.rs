use super::{find, Entry};
use crate::{
    codec,
    db::Db,
    driver::{
        operation::{AddEntry, Modification, ModifyEntry, RenameEntry},
        Connection,
    },
    signal::PostSave,
    Keys, Model, Result,
};

use tracing::debug;

impl<M: Model> Entry<M> {
    /// Writes the record to the directory.
    ///
    /// A record without a DN is added. Otherwise the stored entry is read
    /// back by the last saved primary key and only changed attributes are
    /// sent. When the primary key changed, the entry is renamed before its
    /// attributes are modified.
    ///
    /// Directory errors are returned as is. If the rename succeeds and the
    /// modify fails, the entry stays renamed, in the directory and in `self`.
    pub async fn save(&mut self, db: &Db) -> Result<()> {
        self.save_impl(db, None).await
    }

    /// Like [`Entry::save`], through the connection registered as `alias`.
    pub async fn save_using(&mut self, db: &Db, alias: &str) -> Result<()> {
        self.save_impl(db, Some(alias)).await
    }

    async fn save_impl(&mut self, db: &Db, using: Option<&str>) -> Result<()> {
        let dn = (!self.dn.is_empty()).then_some(self.dn.as_str());
        let alias = db.resolve_alias(&self.schema, &self.variant, using, dn);
        let connection = db.connection(&alias).await?;
        let mut connection = connection.lock().await;

        let created = if self.dn.is_empty() {
            self.create(&mut **connection).await?;
            true
        } else {
            self.update(&mut **connection).await?;
            false
        };
        drop(connection);

        self.saved_pk = self.pk();

        db.signals().post_save(&PostSave {
            model: &self.schema,
            dn: &self.dn,
            pk: &self.saved_pk,
            created,
            record: &self.record,
        });

        Ok(())
    }

    async fn create(&mut self, connection: &mut dyn Connection) -> Result<()> {
        let mut attributes = vec![(
            "objectClass".to_string(),
            self.schema
                .object_classes
                .iter()
                .map(|class| class.as_bytes().to_vec())
                .collect(),
        )];

        for (index, field, attribute) in self.schema.mapped_fields() {
            let value = self.record.get(index);
            if value.is_empty() {
                continue;
            }
            attributes.push((attribute.to_string(), codec::encode(field, &value)?));
        }

        let dn = self.build_dn(&Keys::new())?;

        debug!(dn = %dn, "Creating new LDAP entry");
        connection
            .exec(
                AddEntry {
                    dn: dn.clone(),
                    attributes,
                }
                .into(),
            )
            .await?;

        self.dn = dn;
        Ok(())
    }

    async fn update(&mut self, connection: &mut dyn Connection) -> Result<()> {
        let (_, original) =
            find::<M>(connection, &self.schema, self.base_dn(), &self.saved_pk).await?;

        let mut modifications = vec![];
        for (index, field, attribute) in self.schema.mapped_fields() {
            let old = original.get(index);
            let new = self.record.get(index);
            if old == new {
                continue;
            }

            if !new.is_empty() {
                modifications.push(Modification::Replace(
                    attribute.to_string(),
                    codec::encode(field, &new)?,
                ));
            } else if !old.is_empty() {
                modifications.push(Modification::Delete(attribute.to_string()));
            }
        }

        if modifications.is_empty() {
            debug!(dn = %self.dn, "No changes to be saved to LDAP entry");
            return Ok(());
        }

        let new_dn = self.build_dn(&Keys::new())?;
        if new_dn != self.dn {
            debug!(dn = %self.dn, new_dn = %new_dn, "Renaming LDAP entry");
            connection
                .exec(
                    RenameEntry {
                        dn: self.dn.clone(),
                        new_rdn: self.build_rdn(&Keys::new())?,
                    }
                    .into(),
                )
                .await?;
            self.dn = new_dn;
        }

        debug!(dn = %self.dn, "Modifying existing LDAP entry");
        connection
            .exec(
                ModifyEntry {
                    dn: self.dn.clone(),
                    modifications,
                }
                .into(),
            )
            .await?;

        Ok(())
    }
}
