//! In-process relationship store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::relationships::{AgentRelationship, PairKey};
use crate::storage::errors::StorageError;
use crate::storage::traits::{RelationshipStore, RelationshipUpdateFn};

/// Relationship store backed by a map guarded by an async read/write lock.
///
/// Transactions hold the write lock for the whole read-modify-write, so
/// concurrent interactions on the same pair are serialized.
#[derive(Debug, Default)]
pub struct MemoryRelationshipStore {
    records: RwLock<HashMap<PairKey, AgentRelationship>>,
}

impl MemoryRelationshipStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with relationships.
    ///
    /// Records are keyed by their agent ids, so a record whose `id` is stale
    /// still lands under its canonical key.
    pub fn from_relationships(relationships: impl IntoIterator<Item = AgentRelationship>) -> Self {
        let records = relationships
            .into_iter()
            .map(|rel| (rel.pair_key(), rel))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    /// Number of stored relationships
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no relationships
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Remove every relationship
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

#[async_trait]
impl RelationshipStore for MemoryRelationshipStore {
    async fn health_check(&self) -> Result<bool, StorageError> {
        Ok(true)
    }

    async fn get_relationship(&self, key: &PairKey) -> Result<Option<AgentRelationship>, StorageError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn put_relationship(
        &self,
        relationship: AgentRelationship,
    ) -> Result<AgentRelationship, StorageError> {
        let key = relationship.pair_key();
        debug!(pair = %key, "Storing relationship");
        self.records.write().await.insert(key, relationship.clone());
        Ok(relationship)
    }

    async fn transact_relationship(
        &self,
        key: &PairKey,
        update: RelationshipUpdateFn,
    ) -> Result<AgentRelationship, StorageError> {
        let mut records = self.records.write().await;
        let current = records.get(key).cloned();
        let updated = update(current);

        if updated.pair_key() != *key {
            return Err(StorageError::Transaction(format!(
                "update for '{}' produced a record for '{}'",
                key,
                updated.pair_key()
            )));
        }

        records.insert(key.clone(), updated.clone());
        Ok(updated)
    }

    async fn list_relationships_for_agent(
        &self,
        agent_id: &str,
    ) -> Result<Vec<AgentRelationship>, StorageError> {
        let records = self.records.read().await;
        let mut relationships: Vec<AgentRelationship> = records
            .iter()
            .filter(|(key, _)| key.contains(agent_id))
            .map(|(_, rel)| rel.clone())
            .collect();
        relationships.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(relationships)
    }

    async fn list_relationships(&self) -> Result<Vec<AgentRelationship>, StorageError> {
        let records = self.records.read().await;
        let mut relationships: Vec<AgentRelationship> = records.values().cloned().collect();
        relationships.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(relationships)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_put_and_get_from_either_side() {
        let store = MemoryRelationshipStore::new();
        store
            .put_relationship(AgentRelationship::new("zed", "amy"))
            .await
            .unwrap();

        let forward = store.get_relationship(&PairKey::new("amy", "zed")).await.unwrap();
        let backward = store.get_relationship(&PairKey::new("zed", "amy")).await.unwrap();
        assert!(forward.is_some());
        assert_eq!(forward.unwrap().id, backward.unwrap().id);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_transact_creates_and_updates() {
        let store = MemoryRelationshipStore::new();
        let key = PairKey::new("a", "b");

        let bump: RelationshipUpdateFn = Arc::new(|current| {
            let mut rel = current.unwrap_or_else(|| AgentRelationship::new("a", "b"));
            rel.interaction_count += 1;
            rel
        });

        store.transact_relationship(&key, bump.clone()).await.unwrap();
        let rel = store.transact_relationship(&key, bump).await.unwrap();
        assert_eq!(rel.interaction_count, 2);
    }

    #[tokio::test]
    async fn test_transact_rejects_foreign_record() {
        let store = MemoryRelationshipStore::new();
        let key = PairKey::new("a", "b");
        let wrong: RelationshipUpdateFn = Arc::new(|_| AgentRelationship::new("c", "d"));

        let err = store.transact_relationship(&key, wrong).await.unwrap_err();
        assert!(matches!(err, StorageError::Transaction(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_transactions_are_serialized() {
        let store = Arc::new(MemoryRelationshipStore::new());
        let key = PairKey::new("a", "b");

        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = Arc::clone(&store);
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                let update: RelationshipUpdateFn = Arc::new(|current| {
                    let mut rel = current.unwrap_or_else(|| AgentRelationship::new("a", "b"));
                    rel.interaction_count += 1;
                    rel
                });
                store.transact_relationship(&key, update).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let rel = store.get_relationship(&key).await.unwrap().unwrap();
        assert_eq!(rel.interaction_count, 50);
    }

    #[tokio::test]
    async fn test_list_for_agent() {
        let store = MemoryRelationshipStore::from_relationships(vec![
            AgentRelationship::new("amy", "bob"),
            AgentRelationship::new("carl", "amy"),
            AgentRelationship::new("bob", "carl"),
        ]);

        let amy = store.list_relationships_for_agent("amy").await.unwrap();
        let ids: Vec<&str> = amy.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["amy__bob", "amy__carl"]);

        assert_eq!(store.list_relationships().await.unwrap().len(), 3);
        assert_eq!(store.list_relationships_for_agent("carl").await.unwrap().len(), 2);
        assert!(store.health_check().await.unwrap());
    }

    #[test]
    fn test_put_replaces_existing_record() {
        let store = MemoryRelationshipStore::new();
        let mut rel = AgentRelationship::new("amy", "bob");

        tokio_test::assert_ok!(tokio_test::block_on(store.put_relationship(rel.clone())));
        rel.interaction_count = 3;
        tokio_test::assert_ok!(tokio_test::block_on(store.put_relationship(rel)));

        let all = tokio_test::block_on(store.list_relationships()).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].interaction_count, 3);
    }
}
