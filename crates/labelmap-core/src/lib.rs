//! Core domain types for the sharded label lookup table.

pub mod error;
pub mod ids;

pub use error::{CoreError, CoreResult};
pub use ids::{Label, NodeId};
