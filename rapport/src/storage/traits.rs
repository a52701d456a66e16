//! Trait definitions for the relationship persistence port

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::relationships::{AgentRelationship, PairKey};
use crate::storage::errors::StorageError;

/// Update applied inside a transactional read-modify-write.
///
/// Receives the currently stored record (if any) and returns the record to
/// store. It may be called more than once when a backend retries internally,
/// so it must not have side effects.
pub type RelationshipUpdateFn =
    Arc<dyn Fn(Option<AgentRelationship>) -> AgentRelationship + Send + Sync>;

/// Keyed persistence for relationships, one canonical record per agent pair
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationshipStore: Send + Sync + Debug {
    /// Check if the store is healthy and available
    async fn health_check(&self) -> std::result::Result<bool, StorageError>;

    /// Get the relationship stored under a pair key
    async fn get_relationship(
        &self,
        key: &PairKey,
    ) -> std::result::Result<Option<AgentRelationship>, StorageError>;

    /// Store a relationship under its pair key, replacing any existing record
    async fn put_relationship(
        &self,
        relationship: AgentRelationship,
    ) -> std::result::Result<AgentRelationship, StorageError>;

    /// Atomically read, update and write the record for a pair key
    async fn transact_relationship(
        &self,
        key: &PairKey,
        update: RelationshipUpdateFn,
    ) -> std::result::Result<AgentRelationship, StorageError>;

    /// All relationships involving the given agent, from either side
    async fn list_relationships_for_agent(
        &self,
        agent_id: &str,
    ) -> std::result::Result<Vec<AgentRelationship>, StorageError>;

    /// Every stored relationship, ordered by pair key
    async fn list_relationships(&self) -> std::result::Result<Vec<AgentRelationship>, StorageError>;
}
