//! One independently locked partition of the label map.

use std::collections::HashMap;

use labelmap_core::{Label, NodeId};

use crate::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A partition holding a subset of the label-to-id mapping behind its
/// own reader/writer lock.
///
/// All lock acquisition lives here: `get` takes the lock in shared
/// mode, `put` and `remove` in exclusive mode. Callers never hold more
/// than one shard lock at a time. Under the `loom` feature the lock is
/// loom's instrumented `RwLock` instead of `parking_lot`'s.
pub(crate) struct Shard {
    entries: RwLock<HashMap<Label, NodeId>>,
}

impl Shard {
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Label, NodeId>> {
        // Loom's lock mirrors std's poisoning API; a poisoned lock
        // means a panic already aborted the model.
        #[cfg(feature = "loom")]
        {
            self.entries.read().expect("shard lock poisoned")
        }
        #[cfg(not(feature = "loom"))]
        {
            self.entries.read()
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Label, NodeId>> {
        #[cfg(feature = "loom")]
        {
            self.entries.write().expect("shard lock poisoned")
        }
        #[cfg(not(feature = "loom"))]
        {
            self.entries.write()
        }
    }

    /// Looks up a label under the shared lock.
    pub(crate) fn get(&self, label: Label) -> Option<NodeId> {
        self.read().get(&label).copied()
    }

    /// Inserts or silently overwrites under the exclusive lock.
    pub(crate) fn put(&self, label: Label, id: NodeId) {
        self.write().insert(label, id);
    }

    /// Removes an entry under the exclusive lock, reporting whether it
    /// existed.
    pub(crate) fn remove(&self, label: Label) -> bool {
        self.write().remove(&label).is_some()
    }

    pub(crate) fn contains(&self, label: Label) -> bool {
        self.read().contains_key(&label)
    }

    pub(crate) fn len(&self) -> usize {
        self.read().len()
    }
}
