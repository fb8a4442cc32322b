//! Typed records stored as LDAP directory entries.
//!
//! A [`Model`] describes how a record's fields map to attributes and which
//! field forms the entry's RDN. [`Handle`] builds DNs and loads entries;
//! [`Entry`] adds, updates, renames and deletes them through a [`Db`].

pub mod db;
pub use db::{Builder, Connect, Db, DefaultRouter, Registered, Registry, Router};

mod entry;
pub use entry::Entry;

mod handle;
pub use handle::{Handle, Variant};

mod model;
pub use model::Model;

pub mod signal;
pub use signal::{PostDelete, PostSave};

pub use ldapdb_core::{
    bail, codec, dn, driver, err,
    schema::{self, Field, FieldTy, Keys, SearchScope},
    ConnectionConfig, Error, Result, Settings, Value, ValueRecord,
};
