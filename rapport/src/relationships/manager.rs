//! Relationship management on top of the persistence port

use super::analyzer::RelationshipAnalyzer;
use super::metrics::MetricsEngine;
use super::types::*;
use crate::config::{PersistenceConfig, RapportConfig};
use crate::sentiment::{InteractionDescriptor, SentimentClassifier};
use crate::storage::{RelationshipStore, RelationshipUpdateFn, StorageError};
use crate::{RapportError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of recording one interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionOutcome {
    /// The relationship as persisted after the interaction
    pub relationship: AgentRelationship,

    /// How the interaction was classified
    pub descriptor: InteractionDescriptor,

    /// Whether this interaction created the relationship
    pub created: bool,

    /// The transactional write failed and a best-effort write was used instead.
    /// A concurrent interaction on the same pair may have been overwritten.
    pub degraded_write: bool,
}

/// Records interactions between agents and answers questions about their
/// relationships.
///
/// Classification and metric evolution are pure; this type only adds the
/// load-or-create step and the persistence retry policy.
pub struct RelationshipManager {
    store: Arc<dyn RelationshipStore>,
    classifier: SentimentClassifier,
    engine: MetricsEngine,
    analyzer: RelationshipAnalyzer,
    persistence: PersistenceConfig,
}

impl RelationshipManager {
    /// Create a new relationship manager
    pub fn new(store: Arc<dyn RelationshipStore>, config: &RapportConfig) -> Self {
        info!(
            dampening = %config.relationships.dampening,
            max_events = config.relationships.max_events,
            transaction_retries = config.persistence.transaction_retries,
            "RelationshipManager initialized"
        );

        Self {
            store,
            classifier: SentimentClassifier::new(config.sentiment.keywords.clone()),
            engine: MetricsEngine::new(config.relationships.clone()),
            analyzer: RelationshipAnalyzer::new(config.relationships.trend_window),
            persistence: config.persistence.clone(),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<dyn RelationshipStore> {
        &self.store
    }

    /// Classify an exchange between two agents and apply it to their relationship
    pub async fn record_interaction(
        &self,
        agent_a: &str,
        agent_b: &str,
        text_a: &str,
        text_b: &str,
        context: &str,
    ) -> Result<InteractionOutcome> {
        let descriptor = self.classifier.classify(text_a, text_b);
        self.apply_descriptor(agent_a, agent_b, descriptor, context).await
    }

    /// Apply an already classified interaction to a relationship, creating it
    /// if the two agents have never met
    pub async fn apply_descriptor(
        &self,
        agent_a: &str,
        agent_b: &str,
        descriptor: InteractionDescriptor,
        context: &str,
    ) -> Result<InteractionOutcome> {
        let key = validated_key(agent_a, agent_b)?;

        let engine = self.engine.clone();
        let (first, second) = key.agents();
        let (first, second) = (first.to_string(), second.to_string());
        let context = context.to_string();
        let update: RelationshipUpdateFn = Arc::new(move |current| {
            let base = current.unwrap_or_else(|| engine.new_relationship(&first, &second));
            engine.apply(&base, &descriptor, &context)
        });

        let (relationship, degraded_write) = self.persist(&key, update).await?;
        let created = relationship.interaction_count == 1;

        if created {
            info!(pair = %key, "Created relationship");
        }
        debug!(
            pair = %key,
            sentiment = %descriptor.sentiment,
            event_kind = %descriptor.event_kind,
            status = %relationship.status,
            degraded_write,
            "Recorded interaction"
        );

        Ok(InteractionOutcome {
            relationship,
            descriptor,
            created,
            degraded_write,
        })
    }

    /// The relationship between two agents, looked up in either order
    pub async fn get_relationship(
        &self,
        agent_a: &str,
        agent_b: &str,
    ) -> Result<Option<AgentRelationship>> {
        let key = validated_key(agent_a, agent_b)?;
        Ok(self.store.get_relationship(&key).await?)
    }

    /// The relationship between two agents, or an error if they never met
    pub async fn require_relationship(
        &self,
        agent_a: &str,
        agent_b: &str,
    ) -> Result<AgentRelationship> {
        let key = validated_key(agent_a, agent_b)?;
        self.store
            .get_relationship(&key)
            .await?
            .ok_or_else(|| RapportError::RelationshipNotFound {
                pair_key: key.to_string(),
            })
    }

    /// Every relationship the agent takes part in
    pub async fn relationships_for(&self, agent: &str) -> Result<Vec<AgentRelationship>> {
        Ok(self.store.list_relationships_for_agent(agent).await?)
    }

    /// Recent direction of the relationship between two agents
    pub async fn trend(&self, agent_a: &str, agent_b: &str) -> Result<TrendDirection> {
        let relationship = self.require_relationship(agent_a, agent_b).await?;
        Ok(self.analyzer.trend(&relationship))
    }

    /// Get a summary of the relationship between two agents
    pub async fn relationship_summary(&self, agent_a: &str, agent_b: &str) -> Result<String> {
        let rel = self.require_relationship(agent_a, agent_b).await?;
        let tags = rel
            .type_tags
            .iter()
            .map(|tag| tag.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!(
            "{} and {} have a {} relationship (trust: {:.2}, respect: {:.2}, affection: {:.2}, \
             familiarity: {:.2}). Status: {}, recent trend: {}, {} interactions",
            agent_a,
            agent_b,
            tags,
            rel.metrics.trust,
            rel.metrics.respect,
            rel.metrics.affection,
            rel.metrics.familiarity,
            rel.status,
            self.analyzer.trend(&rel),
            rel.interaction_count
        ))
    }

    /// Check the store is reachable
    pub async fn health_check(&self) -> Result<bool> {
        Ok(self.store.health_check().await?)
    }

    /// Write through the transactional path, retrying per the persistence
    /// policy, then fall back to a plain read-then-put if allowed.
    async fn persist(
        &self,
        key: &PairKey,
        update: RelationshipUpdateFn,
    ) -> Result<(AgentRelationship, bool)> {
        let attempts = self.persistence.transaction_retries.saturating_add(1);
        let mut last_error: Option<StorageError> = None;

        for attempt in 1..=attempts {
            match self.store.transact_relationship(key, Arc::clone(&update)).await {
                Ok(relationship) => return Ok((relationship, false)),
                Err(err) => {
                    let retry = err.is_retryable() && attempt < attempts;
                    warn!(
                        pair = %key,
                        attempt,
                        error = %err,
                        "Relationship transaction failed{}",
                        if retry { ", retrying" } else { "" }
                    );
                    last_error = Some(err);
                    if !retry {
                        break;
                    }
                    if self.persistence.retry_delay_ms > 0 {
                        tokio::time::sleep(Duration::from_millis(self.persistence.retry_delay_ms))
                            .await;
                    }
                }
            }
        }

        if !self.persistence.best_effort_fallback {
            return Err(last_error
                .map(RapportError::from)
                .unwrap_or_else(|| RapportError::Other("relationship write failed".to_string())));
        }

        warn!(
            pair = %key,
            "Falling back to non-transactional relationship write; concurrent updates may be lost"
        );
        let current = self.store.get_relationship(key).await?;
        let relationship = self.store.put_relationship(update(current)).await?;
        Ok((relationship, true))
    }
}

impl std::fmt::Debug for RelationshipManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationshipManager")
            .field("store", &self.store)
            .field("engine", &self.engine)
            .field("persistence", &self.persistence)
            .finish()
    }
}

fn validated_key(agent_a: &str, agent_b: &str) -> Result<PairKey> {
    for agent in [agent_a, agent_b] {
        if agent.trim().is_empty() {
            return Err(RapportError::InvalidAgentId("agent id is empty".to_string()));
        }
        if agent.contains(PAIR_KEY_SEPARATOR) {
            return Err(RapportError::InvalidAgentId(format!(
                "'{}' contains the reserved separator '{}'",
                agent, PAIR_KEY_SEPARATOR
            )));
        }
    }
    if agent_a == agent_b {
        return Err(RapportError::SelfRelationship {
            agent_id: agent_a.to_string(),
        });
    }
    Ok(PairKey::new(agent_a, agent_b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::sentiment::{EventKind, Sentiment};
    use crate::storage::{MemoryRelationshipStore, MockRelationshipStore};

    const GRATEFUL: (&str, &str) = (
        "Thank you so much for your help and support!",
        "You're welcome, happy to help",
    );

    fn config_with_retries(retries: u32, fallback: bool) -> RapportConfig {
        ConfigBuilder::testing()
            .with_retry_policy(retries, 0, fallback)
            .build()
            .unwrap()
    }

    fn memory_manager() -> RelationshipManager {
        RelationshipManager::new(
            Arc::new(MemoryRelationshipStore::new()),
            &config_with_retries(1, true),
        )
    }

    #[tokio::test]
    async fn test_record_creates_then_updates() {
        let manager = memory_manager();

        let first = manager
            .record_interaction("grace", "ada", GRATEFUL.0, GRATEFUL.1, "code review")
            .await
            .unwrap();
        assert!(first.created);
        assert!(!first.degraded_write);
        assert_eq!(first.descriptor.sentiment, Sentiment::Positive);
        assert_eq!(first.descriptor.event_kind, EventKind::Help);
        assert_eq!(first.relationship.id, "ada__grace");
        assert!(first.relationship.metrics.trust > 0.5);

        let second = manager
            .record_interaction("ada", "grace", "ok", "sure", "")
            .await
            .unwrap();
        assert!(!second.created);
        assert_eq!(second.relationship.interaction_count, 2);
        assert!(second.relationship.metrics.familiarity > first.relationship.metrics.familiarity);
    }

    #[tokio::test]
    async fn test_self_interaction_rejected() {
        let manager = memory_manager();
        let err = manager
            .record_interaction("ada", "ada", "hi", "hi", "")
            .await
            .unwrap_err();
        assert!(matches!(err, RapportError::SelfRelationship { .. }));
    }

    #[tokio::test]
    async fn test_invalid_agent_ids_rejected() {
        let manager = memory_manager();
        assert!(matches!(
            manager.record_interaction("", "ada", "", "", "").await,
            Err(RapportError::InvalidAgentId(_))
        ));
        assert!(matches!(
            manager.record_interaction("a__b", "ada", "", "", "").await,
            Err(RapportError::InvalidAgentId(_))
        ));
    }

    #[tokio::test]
    async fn test_summary_and_trend() {
        let manager = memory_manager();
        for _ in 0..5 {
            manager
                .record_interaction("ada", "grace", GRATEFUL.0, GRATEFUL.1, "")
                .await
                .unwrap();
        }

        assert_eq!(manager.trend("grace", "ada").await.unwrap(), TrendDirection::Improving);

        let summary = manager.relationship_summary("ada", "grace").await.unwrap();
        assert!(summary.starts_with("ada and grace have a"));
        assert!(summary.contains("5 interactions"));

        let missing = manager.relationship_summary("ada", "linus").await.unwrap_err();
        assert!(matches!(missing, RapportError::RelationshipNotFound { .. }));
    }

    #[tokio::test]
    async fn test_retry_then_success() {
        let mut store = MockRelationshipStore::new();
        let mut calls = 0;
        store
            .expect_transact_relationship()
            .times(2)
            .returning(move |_, update| {
                calls += 1;
                if calls == 1 {
                    Err(StorageError::Conflict("busy".to_string()))
                } else {
                    Ok(update(None))
                }
            });
        store.expect_put_relationship().never();

        let manager = RelationshipManager::new(Arc::new(store), &config_with_retries(1, true));
        let outcome = manager
            .record_interaction("ada", "grace", GRATEFUL.0, GRATEFUL.1, "")
            .await
            .unwrap();

        assert!(!outcome.degraded_write);
        assert!(outcome.created);
    }

    #[tokio::test]
    async fn test_fallback_after_retries_exhausted() {
        let mut store = MockRelationshipStore::new();
        store
            .expect_transact_relationship()
            .times(2)
            .returning(|_, _| Err(StorageError::Conflict("busy".to_string())));
        store.expect_get_relationship().times(1).returning(|_| Ok(None));
        store
            .expect_put_relationship()
            .times(1)
            .returning(|relationship| Ok(relationship));

        let manager = RelationshipManager::new(Arc::new(store), &config_with_retries(1, true));
        let outcome = manager
            .record_interaction("ada", "grace", GRATEFUL.0, GRATEFUL.1, "")
            .await
            .unwrap();

        assert!(outcome.degraded_write);
        assert_eq!(outcome.relationship.interaction_count, 1);
    }

    #[tokio::test]
    async fn test_non_retryable_error_skips_retries() {
        let mut store = MockRelationshipStore::new();
        store
            .expect_transact_relationship()
            .times(1)
            .returning(|_, _| Err(StorageError::Serialization("corrupt".to_string())));
        store.expect_get_relationship().times(1).returning(|_| Ok(None));
        store
            .expect_put_relationship()
            .times(1)
            .returning(|relationship| Ok(relationship));

        let manager = RelationshipManager::new(Arc::new(store), &config_with_retries(3, true));
        let outcome = manager
            .record_interaction("ada", "grace", "hello", "hi", "")
            .await
            .unwrap();
        assert!(outcome.degraded_write);
    }

    #[tokio::test]
    async fn test_error_propagates_without_fallback() {
        let mut store = MockRelationshipStore::new();
        store
            .expect_transact_relationship()
            .times(2)
            .returning(|_, _| Err(StorageError::Conflict("busy".to_string())));
        store.expect_put_relationship().never();

        let manager = RelationshipManager::new(Arc::new(store), &config_with_retries(1, false));
        let err = manager
            .record_interaction("ada", "grace", "hello", "hi", "")
            .await
            .unwrap_err();
        assert!(matches!(err, RapportError::Storage(StorageError::Conflict(_))));
    }
}
