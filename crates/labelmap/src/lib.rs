//! Sharded concurrent label-to-node-id lookup for ANN graph indexes.
//!
//! Graph-based approximate-nearest-neighbor indexes address points by
//! dense internal node positions, while callers address them by
//! arbitrary external labels. [`ShardedLabelMap`] translates between
//! the two under heavy concurrent insert/find/erase traffic from index
//! build and query workers, avoiding a single global lock by
//! partitioning the mapping across independently locked shards.
//!
//! The [`profiler`] module is an optional collaborator for timing
//! tagged code regions per thread; it has no effect on the table's
//! correctness.

// Conditional compilation for loom testing vs production. Swapping in
// loom's instrumented lock lets the model checker preempt inside shard
// critical sections; without the swap it would see no synchronization
// points and explore a single schedule.
#[cfg(feature = "loom")]
mod sync {
    pub(crate) use loom::sync::RwLock;
    pub(crate) type RwLockReadGuard<'a, T> = loom::sync::RwLockReadGuard<'a, T>;
    pub(crate) type RwLockWriteGuard<'a, T> = loom::sync::RwLockWriteGuard<'a, T>;
}

#[cfg(not(feature = "loom"))]
mod sync {
    pub(crate) use parking_lot::RwLock;
    pub(crate) type RwLockReadGuard<'a, T> = parking_lot::RwLockReadGuard<'a, T>;
    pub(crate) type RwLockWriteGuard<'a, T> = parking_lot::RwLockWriteGuard<'a, T>;
}

pub mod config;
pub mod profiler;
mod shard;
mod table;

pub use config::{LookupConfig, DEFAULT_SHARD_COUNT};
pub use profiler::{Profiler, Recorder, RegionStats, RegionTimer};
pub use table::ShardedLabelMap;

pub use labelmap_core::{CoreError, CoreResult, Label, NodeId};
