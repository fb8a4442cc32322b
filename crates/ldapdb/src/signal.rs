//! Lifecycle notifications fired after a directory write succeeded.
//!
//! Observers run synchronously, in registration order, on the task that
//! performed the write. An observer returning an error is logged and the
//! remaining observers still run; the directory write stays committed.

use crate::{schema, Result, Value};

use std::any::Any;
use tracing::warn;

/// Fired after an entry was added or updated.
#[derive(Debug)]
pub struct PostSave<'a> {
    pub model: &'a schema::Model,

    /// DN of the entry after the save
    pub dn: &'a str,

    /// Primary key the entry was saved with
    pub pk: &'a Value,

    /// `true` if the entry was added, `false` if an existing entry was
    /// updated (including a save with no changes)
    pub created: bool,

    pub(crate) record: &'a (dyn Any + Send + Sync),
}

/// Fired after an entry was deleted.
#[derive(Debug)]
pub struct PostDelete<'a> {
    pub model: &'a schema::Model,

    /// DN the entry had before it was deleted
    pub dn: &'a str,

    pub(crate) record: &'a (dyn Any + Send + Sync),
}

impl PostSave<'_> {
    /// The saved record, if it is an `M`.
    pub fn record<M: 'static>(&self) -> Option<&M> {
        self.record.downcast_ref()
    }
}

impl PostDelete<'_> {
    /// The deleted record, if it is an `M`.
    pub fn record<M: 'static>(&self) -> Option<&M> {
        self.record.downcast_ref()
    }
}

type PostSaveFn = Box<dyn Fn(&PostSave<'_>) -> Result<()> + Send + Sync>;
type PostDeleteFn = Box<dyn Fn(&PostDelete<'_>) -> Result<()> + Send + Sync>;

#[derive(Default)]
pub(crate) struct Signals {
    post_save: Vec<PostSaveFn>,
    post_delete: Vec<PostDeleteFn>,
}

impl Signals {
    pub(crate) fn on_post_save(&mut self, f: PostSaveFn) {
        self.post_save.push(f);
    }

    pub(crate) fn on_post_delete(&mut self, f: PostDeleteFn) {
        self.post_delete.push(f);
    }

    pub(crate) fn post_save(&self, signal: &PostSave<'_>) {
        for (index, observer) in self.post_save.iter().enumerate() {
            if let Err(error) = observer(signal) {
                warn!(
                    model = %signal.model.name,
                    dn = %signal.dn,
                    observer = index,
                    %error,
                    "post_save observer failed"
                );
            }
        }
    }

    pub(crate) fn post_delete(&self, signal: &PostDelete<'_>) {
        for (index, observer) in self.post_delete.iter().enumerate() {
            if let Err(error) = observer(signal) {
                warn!(
                    model = %signal.model.name,
                    dn = %signal.dn,
                    observer = index,
                    %error,
                    "post_delete observer failed"
                );
            }
        }
    }
}

impl std::fmt::Debug for Signals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signals")
            .field("post_save", &self.post_save.len())
            .field("post_delete", &self.post_delete.len())
            .finish()
    }
}
