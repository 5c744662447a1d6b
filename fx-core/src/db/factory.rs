use std::collections::HashMap;

use async_trait::async_trait;

use super::repository::{KeyValueRepository, RepositoryError};

/// Which storage backend to open, and where.
///
/// | backend    | connection_string                   |
/// |------------|-------------------------------------|
/// | `sqlite`   | a file path such as `fx-calc.db`, or `:memory:` |
/// | `memory`   | ignored                             |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub backend: String,
    /// Handed to the backend's factory as is.
    pub connection_string: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "fx-calc.db".to_string(),
        }
    }
}

/// Opens a [`KeyValueRepository`] for one backend.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Name used in [`DbConfig::backend`], lowercase.
    fn backend_name(&self) -> &'static str;

    /// Open the store, creating it (and its schema) when missing.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn KeyValueRepository>, RepositoryError>;
}

/// Backend factories by name. The binary fills one at startup and opens
/// storage through it.
pub struct RepositoryRegistry {
    factories: HashMap<&'static str, Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Add a factory. A later factory with the same name wins.
    pub fn register(
        &mut self,
        factory: Box<dyn RepositoryFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Open storage with the factory named by `config.backend`.
    ///
    /// Fails with [`RepositoryError::Configuration`] when that name is not
    /// registered; otherwise returns whatever the factory returns.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn KeyValueRepository>, RepositoryError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                RepositoryError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for RepositoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}
