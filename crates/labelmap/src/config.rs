//! Configuration for the sharded label map.

use serde::{Deserialize, Serialize};

use labelmap_core::{CoreError, CoreResult};

/// Default number of shards.
///
/// Chosen to balance per-shard contention against per-shard lock and
/// map overhead for typical multi-core index-build workloads.
pub const DEFAULT_SHARD_COUNT: usize = 128;

/// Configuration for [`ShardedLabelMap`](crate::ShardedLabelMap).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Number of independently locked shards (default: 128).
    ///
    /// Fixed for the life of the table. More shards reduce lock
    /// contention between worker threads; fewer shards reduce memory
    /// overhead. There is no resize or rebalance.
    pub shard_count: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            shard_count: DEFAULT_SHARD_COUNT,
        }
    }
}

impl LookupConfig {
    /// Creates a configuration with an explicit shard count.
    #[must_use]
    pub fn with_shard_count(shard_count: usize) -> Self {
        Self { shard_count }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] when `shard_count` is zero.
    pub fn validate(&self) -> CoreResult<()> {
        if self.shard_count == 0 {
            return Err(CoreError::invalid_config("shard_count must be non-zero"));
        }
        Ok(())
    }
}
