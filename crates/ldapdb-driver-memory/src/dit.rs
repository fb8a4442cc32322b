use crate::MemoryError;

use indexmap::IndexMap;
use ldapdb_core::{
    dn,
    driver::{
        operation::{AddEntry, DeleteEntry, FindByKey, Modification, ModifyEntry, RenameEntry},
        DirEntry,
    },
    schema::SearchScope,
};

/// Directory information tree, keyed by normalized DN.
#[derive(Debug, Default)]
pub(crate) struct Dit {
    entries: IndexMap<String, DirEntry>,
}

type Result<T> = std::result::Result<T, MemoryError>;

impl Dit {
    pub(crate) fn get(&self, name: &str) -> Option<&DirEntry> {
        self.entries.get(&normalize(name).ok()?)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn add(&mut self, op: AddEntry) -> Result<()> {
        let key = normalize(&op.dn)?;
        if self.entries.contains_key(&key) {
            return Err(MemoryError::AlreadyExists(op.dn));
        }

        let mut entry = DirEntry::new(op.dn);
        for (attribute, values) in op.attributes {
            if !values.is_empty() {
                entry.attributes.insert(attribute, values);
            }
        }

        self.entries.insert(key, entry);
        Ok(())
    }

    pub(crate) fn modify(&mut self, op: ModifyEntry) -> Result<()> {
        let key = normalize(&op.dn)?;
        let Some(current) = self.entries.get(&key) else {
            return Err(MemoryError::NoSuchObject(op.dn));
        };

        // Modifications apply atomically: work on a copy
        let mut entry = current.clone();
        for modification in op.modifications {
            match modification {
                Modification::Replace(attribute, values) => {
                    entry.take(&attribute);
                    if !values.is_empty() {
                        entry.attributes.insert(attribute, values);
                    }
                }
                Modification::Delete(attribute) => {
                    if entry.take(&attribute).is_empty() {
                        return Err(MemoryError::NoSuchAttribute {
                            dn: op.dn,
                            attribute,
                        });
                    }
                }
            }
        }

        self.entries.insert(key, entry);
        Ok(())
    }

    pub(crate) fn rename(&mut self, op: RenameEntry) -> Result<()> {
        let old_key = normalize(&op.dn)?;
        let Some(mut entry) = self.entries.get(&old_key).cloned() else {
            return Err(MemoryError::NoSuchObject(op.dn));
        };

        let (old_rdn, parent) = dn::split_rdn(&entry.dn);
        let old_avas = parse_rdn(old_rdn)?;
        let new_avas = parse_rdn(&op.new_rdn)?;
        let new_dn = dn::join(&op.new_rdn, parent.unwrap_or(""));
        let new_key = normalize(&new_dn)?;

        if new_key != old_key && self.entries.contains_key(&new_key) {
            return Err(MemoryError::AlreadyExists(new_dn));
        }

        for (attribute, value) in old_avas {
            remove_value(&mut entry, &attribute, &value);
        }
        for (attribute, value) in new_avas {
            add_value(&mut entry, &attribute, value);
        }
        entry.dn = new_dn.clone();

        // Move descendants along with the entry
        let children: Vec<String> = self
            .entries
            .keys()
            .filter(|key| is_descendant(key, &old_key))
            .cloned()
            .collect();

        self.entries.shift_remove(&old_key);
        self.entries.insert(new_key.clone(), entry);

        for child_key in children {
            let Some(mut child) = self.entries.shift_remove(&child_key) else {
                continue;
            };
            let child_rdns = &child_key[..child_key.len() - old_key.len() - 1];
            let relative = leading_rdns(&child.dn, rdn_count(child_rdns));
            child.dn = dn::join(&relative, &new_dn);
            self.entries.insert(format!("{child_rdns},{new_key}"), child);
        }

        Ok(())
    }

    pub(crate) fn delete(&mut self, op: DeleteEntry) -> Result<()> {
        let key = normalize(&op.dn)?;
        if !self.entries.contains_key(&key) {
            return Err(MemoryError::NoSuchObject(op.dn));
        }

        if self.entries.keys().any(|k| is_descendant(k, &key)) {
            return Err(MemoryError::NotAllowedOnNonLeaf(op.dn));
        }

        self.entries.shift_remove(&key);
        Ok(())
    }

    pub(crate) fn find_by_key(&self, op: &FindByKey) -> Result<Vec<DirEntry>> {
        let base = normalize(&op.base_dn)?;
        let needle = String::from_utf8_lossy(&op.value).to_lowercase();

        let mut found = vec![];
        for (key, entry) in &self.entries {
            if !in_scope(key, &base, op.scope) {
                continue;
            }

            let matches = entry.get(&op.attribute).is_some_and(|values| {
                values
                    .iter()
                    .any(|value| String::from_utf8_lossy(value).to_lowercase() == needle)
            });
            if !matches || !has_object_classes(entry, &op.object_classes) {
                continue;
            }

            let mut projected = DirEntry::new(entry.dn.clone());
            for (attribute, values) in &entry.attributes {
                let requested = op.attributes.is_empty()
                    || op
                        .attributes
                        .iter()
                        .any(|a| a.eq_ignore_ascii_case(attribute));
                if requested {
                    projected.attributes.insert(attribute.clone(), values.clone());
                }
            }
            found.push(projected);
        }

        Ok(found)
    }
}

fn has_object_classes(entry: &DirEntry, object_classes: &[String]) -> bool {
    let present = entry.get("objectClass").map(Vec::as_slice).unwrap_or_default();
    object_classes.iter().all(|class| {
        present
            .iter()
            .any(|value| String::from_utf8_lossy(value).eq_ignore_ascii_case(class))
    })
}

fn normalize(name: &str) -> Result<String> {
    dn::normalize(name).map_err(|_| MemoryError::InvalidDnSyntax(name.to_string()))
}

fn parse_rdn(rdn: &str) -> Result<Vec<(String, String)>> {
    dn::parse_rdn(rdn).map_err(|_| MemoryError::InvalidDnSyntax(rdn.to_string()))
}

fn in_scope(key: &str, base: &str, scope: SearchScope) -> bool {
    if base.is_empty() {
        return scope != SearchScope::Base || key.is_empty();
    }

    match scope {
        SearchScope::Base => key == base,
        SearchScope::OneLevel => {
            let (_, parent) = dn::split_rdn(key);
            parent == Some(base)
        }
        SearchScope::Subtree => key == base || is_descendant(key, base),
    }
}

/// Returns `true` if `key` names an entry strictly below `base`.
fn is_descendant(key: &str, base: &str) -> bool {
    let Some(prefix) = key
        .strip_suffix(base)
        .and_then(|rest| rest.strip_suffix(','))
    else {
        return false;
    };

    // The separating comma must not itself be escaped
    let backslashes = prefix.chars().rev().take_while(|c| *c == '\\').count();
    !prefix.is_empty() && backslashes % 2 == 0
}

fn rdn_count(name: &str) -> usize {
    let mut count = 1;
    let mut rest = name;
    while let (_, Some(parent)) = dn::split_rdn(rest) {
        count += 1;
        rest = parent;
    }
    count
}

/// The first `depth` RDNs of `name`.
fn leading_rdns(name: &str, depth: usize) -> String {
    let mut rdns = vec![];
    let mut rest = name;
    for _ in 0..depth {
        let (rdn, parent) = dn::split_rdn(rest);
        rdns.push(rdn);
        match parent {
            Some(parent) => rest = parent,
            None => break,
        }
    }
    rdns.join(",")
}

fn remove_value(entry: &mut DirEntry, attribute: &str, value: &str) {
    let mut values = entry.take(attribute);
    values.retain(|v| !String::from_utf8_lossy(v).eq_ignore_ascii_case(value));
    if !values.is_empty() {
        entry.attributes.insert(attribute.to_string(), values);
    }
}

fn add_value(entry: &mut DirEntry, attribute: &str, value: String) {
    let mut values = entry.take(attribute);
    if !values
        .iter()
        .any(|v| String::from_utf8_lossy(v).eq_ignore_ascii_case(&value))
    {
        values.push(value.into_bytes());
    }
    entry.attributes.insert(attribute.to_string(), values);
}
