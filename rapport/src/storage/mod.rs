//! Storage abstractions and implementations
//!
//! Relationships are persisted through the [`RelationshipStore`] port, one
//! canonical record per unordered agent pair. Lookups from either agent's
//! perspective resolve through the same [`PairKey`](crate::relationships::PairKey),
//! so there is never a second copy that could diverge.
//!
//! ## Storage Implementations
//!
//! - **Memory**: in-process map guarded by an async lock, with serialized
//!   transactions. Used by the CLI and in tests.

pub mod errors;
pub mod memory;
pub mod traits;

pub use errors::{StorageError, StorageResult};
pub use memory::MemoryRelationshipStore;
pub use traits::{RelationshipStore, RelationshipUpdateFn};

#[cfg(test)]
pub use traits::MockRelationshipStore;
