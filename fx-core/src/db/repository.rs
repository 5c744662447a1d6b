use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

/// String key-value storage, one value per key.
///
/// This is the whole storage surface the calculators need: a snapshot is
/// encoded to text and kept under a fixed key.
#[async_trait]
pub trait KeyValueRepository: Send + Sync {
    /// Value stored under `key`, or `None` if nothing was ever stored.
    async fn get_item(
        &self,
        key: &str,
    ) -> Result<Option<String>, RepositoryError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), RepositoryError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove_item(
        &self,
        key: &str,
    ) -> Result<(), RepositoryError>;
}

/// Lets several owners share one store.
#[async_trait]
impl<T: KeyValueRepository + ?Sized> KeyValueRepository for Arc<T> {
    async fn get_item(
        &self,
        key: &str,
    ) -> Result<Option<String>, RepositoryError> {
        (**self).get_item(key).await
    }

    async fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), RepositoryError> {
        (**self).set_item(key, value).await
    }

    async fn remove_item(
        &self,
        key: &str,
    ) -> Result<(), RepositoryError> {
        (**self).remove_item(key).await
    }
}
