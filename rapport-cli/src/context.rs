use rapport::config::{ConfigLoader, LogFormat, LogLevel, RapportConfig};
use rapport::prelude::*;
use rapport::storage::StorageError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Everything a command needs: validated configuration, the relationship
/// store and a manager on top of it.
pub struct RapportCliContext {
    pub config: RapportConfig,
    pub store: Arc<MemoryRelationshipStore>,
    pub manager: RelationshipManager,
    store_path: Option<PathBuf>,
}

impl RapportCliContext {
    /// Load configuration and the relationship file, then initialize logging.
    ///
    /// `log_level` overrides whatever level the configuration asks for.
    pub fn new(
        config_path: Option<&Path>,
        store_path: Option<PathBuf>,
        log_level: LogLevel,
    ) -> rapport::Result<Self> {
        let mut loader = ConfigLoader::new();
        match config_path {
            Some(path) => {
                loader.load_file(path)?;
            }
            None => {
                loader.load_default_files();
            }
        }
        let mut config = loader.load_env().extract()?;
        config.logging.level = log_level;
        config.logging.format = LogFormat::Compact;
        let config = rapport::init(config)?;

        let relationships = match &store_path {
            Some(path) => load_relationships(path)?,
            None => Vec::new(),
        };
        debug!(count = relationships.len(), "Loaded relationships");

        let store = Arc::new(MemoryRelationshipStore::from_relationships(relationships));
        let manager = RelationshipManager::new(store.clone(), &config);

        Ok(Self {
            config,
            store,
            manager,
            store_path,
        })
    }

    /// Write every relationship back to the store file, if one was given
    pub async fn save(&self) -> rapport::Result<()> {
        let Some(path) = &self.store_path else {
            return Ok(());
        };

        let relationships = self.store.list_relationships().await?;
        let json = serde_json::to_string_pretty(&relationships).map_err(StorageError::from)?;
        std::fs::write(path, json).map_err(StorageError::from)?;
        debug!(path = %path.display(), count = relationships.len(), "Saved relationships");
        Ok(())
    }
}

/// Read relationship records from a JSON file. A missing file is an empty store.
pub fn load_relationships(path: &Path) -> rapport::Result<Vec<AgentRelationship>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path).map_err(StorageError::from)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let relationships = serde_json::from_str(&content).map_err(StorageError::from)?;
    Ok(relationships)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_store_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let relationships = load_relationships(&dir.path().join("nope.json")).unwrap();
        assert!(relationships.is_empty());
    }

    #[test]
    fn test_corrupt_store_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            load_relationships(&path),
            Err(RapportError::Storage(StorageError::Serialization(_)))
        ));
    }

    #[tokio::test]
    async fn test_round_trip_through_store_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let ctx = RapportCliContext::new(None, Some(path.clone()), LogLevel::Error).unwrap();
        ctx.manager
            .record_interaction("ada", "grace", "thank you", "happy to help", "pairing")
            .await
            .unwrap();
        ctx.save().await.unwrap();

        let reopened = RapportCliContext::new(None, Some(path), LogLevel::Error).unwrap();
        let rel = reopened
            .manager
            .require_relationship("grace", "ada")
            .await
            .unwrap();
        assert_eq!(rel.interaction_count, 1);
    }
}
