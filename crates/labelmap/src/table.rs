//! The sharded lookup table and its router.

use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;

use tracing::debug;

use labelmap_core::{CoreResult, Label, NodeId};

use crate::config::LookupConfig;
use crate::shard::Shard;

/// Concurrent label-to-node-id lookup table, partitioned across a
/// fixed number of independently locked shards.
///
/// Every operation routes to exactly one shard and acquires only that
/// shard's lock, so writers to different shards never contend and
/// readers of the same shard proceed in parallel. Operations on the
/// same shard are linearized by its lock: a completed [`insert`]
/// happens-before any [`find`] or [`erase`] that later acquires the
/// same lock. No ordering is defined between operations on different
/// shards.
///
/// The shard locks are `parking_lot` reader/writer locks: they do not
/// poison, and fairness between waiting readers and writers is
/// whatever the primitive provides (task-fair, implementation-defined).
///
/// The table is `Send + Sync`; share it across worker threads with
/// `Arc`.
///
/// [`insert`]: ShardedLabelMap::insert
/// [`find`]: ShardedLabelMap::find
/// [`erase`]: ShardedLabelMap::erase
pub struct ShardedLabelMap {
    shards: Box<[Shard]>,
    hasher: RandomState,
}

impl ShardedLabelMap {
    /// Creates a table with the default shard count.
    #[must_use]
    pub fn new() -> Self {
        // Default config always validates.
        Self::with_config(&LookupConfig::default()).unwrap_or_else(|_| unreachable!())
    }

    /// Creates a table with the given configuration.
    ///
    /// The shard count is fixed for the life of the table; shards are
    /// never added or removed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`](labelmap_core::CoreError::InvalidConfig)
    /// when the configuration fails validation.
    pub fn with_config(config: &LookupConfig) -> CoreResult<Self> {
        config.validate()?;
        let shards: Box<[Shard]> = (0..config.shard_count).map(|_| Shard::new()).collect();
        debug!(shard_count = shards.len(), "created sharded label map");
        Ok(Self {
            shards,
            hasher: RandomState::new(),
        })
    }

    /// Returns the shard index owning `label`.
    ///
    /// Pure and lock-free: hash of the label modulo the shard count.
    /// The hasher is seeded once at construction, so routing is
    /// deterministic for the life of this table instance. Different
    /// table instances may route the same label differently.
    #[must_use]
    pub fn shard_of(&self, label: Label) -> usize {
        (self.hasher.hash_one(label) % self.shards.len() as u64) as usize
    }

    /// Records `label -> id`, silently overwriting any existing entry.
    ///
    /// Overwrite is observably indistinguishable from a fresh insert;
    /// the table never reports whether the label was already present.
    /// Blocks only writers and readers of the same shard.
    pub fn insert(&self, label: Label, id: NodeId) {
        self.shards[self.shard_of(label)].put(label, id);
    }

    /// Resolves a label to its node id, or `None` if absent.
    ///
    /// Concurrent readers of the same shard do not block each other;
    /// a reader blocks only while a writer holds or waits for that
    /// shard's lock.
    #[must_use]
    pub fn find(&self, label: Label) -> Option<NodeId> {
        self.shards[self.shard_of(label)].get(label)
    }

    /// Removes a label's entry, reporting whether it existed.
    pub fn erase(&self, label: Label) -> bool {
        self.shards[self.shard_of(label)].remove(label)
    }

    /// Returns whether a label is currently registered.
    #[must_use]
    pub fn contains(&self, label: Label) -> bool {
        self.shards[self.shard_of(label)].contains(label)
    }

    /// Sum of per-shard entry counts.
    ///
    /// Equals the number of distinct currently registered labels. With
    /// concurrent writers this is a point-in-time aggregate, not a
    /// linearizable snapshot across shards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shards.iter().map(Shard::len).sum()
    }

    /// Returns whether the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.len() == 0)
    }

    /// Number of shards, fixed at construction.
    #[must_use]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Per-shard entry counts, for occupancy diagnostics.
    #[must_use]
    pub fn shard_sizes(&self) -> Vec<usize> {
        self.shards.iter().map(Shard::len).collect()
    }
}

impl Default for ShardedLabelMap {
    fn default() -> Self {
        Self::new()
    }
}
