use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::factory::{DbConfig, RepositoryFactory};
use super::repository::{KeyValueRepository, RepositoryError};

/// Process-local [`KeyValueRepository`]. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, RepositoryError> {
        self.items
            .lock()
            .map_err(|e| RepositoryError::Database(format!("memory store poisoned: {e}")))
    }
}

#[async_trait]
impl KeyValueRepository for MemoryRepository {
    async fn get_item(
        &self,
        key: &str,
    ) -> Result<Option<String>, RepositoryError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), RepositoryError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(
        &self,
        key: &str,
    ) -> Result<(), RepositoryError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// [`RepositoryFactory`] for the `"memory"` backend.
///
/// The connection string is ignored; every call returns a fresh, empty store.
pub struct MemoryRepositoryFactory;

#[async_trait]
impl RepositoryFactory for MemoryRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &DbConfig,
    ) -> Result<Box<dyn KeyValueRepository>, RepositoryError> {
        Ok(Box::new(MemoryRepository::new()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let repo = MemoryRepository::new();

        assert_eq!(repo.get_item("keyvalues").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_item_replaces_previous_value() {
        let repo = MemoryRepository::new();

        repo.set_item("k", "first").await.unwrap();
        repo.set_item("k", "second").await.unwrap();

        assert_eq!(repo.get_item("k").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn remove_item_deletes_and_tolerates_missing_keys() {
        let repo = MemoryRepository::new();
        repo.set_item("k", "v").await.unwrap();

        repo.remove_item("k").await.unwrap();
        repo.remove_item("k").await.unwrap();

        assert_eq!(repo.get_item("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn factory_ignores_connection_string() {
        let config = DbConfig {
            backend: "memory".to_string(),
            connection_string: "anything".to_string(),
        };

        let repo = MemoryRepositoryFactory.create(&config).await.unwrap();

        assert_eq!(repo.get_item("k").await.unwrap(), None);
    }
}
