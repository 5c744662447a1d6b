//! Saved inputs of the transfer calculator.
//!
//! The five transfer inputs are kept as one JSON object under a fixed key
//! of a [`KeyValueRepository`]. Saving is gated: a snapshot with any
//! negative field is silently skipped and the last good one stays in place.

use tracing::{debug, warn};

use crate::TransferInputs;
use crate::db::{KeyValueRepository, RepositoryError};

/// Key the transfer snapshot is stored under.
pub const STORAGE_KEY: &str = "keyvalues";

pub struct TransferSnapshotStore {
    repo: Box<dyn KeyValueRepository>,
}

impl TransferSnapshotStore {
    pub fn new(repo: Box<dyn KeyValueRepository>) -> Self {
        Self { repo }
    }

    /// Read the saved snapshot, or all zeros if there is none.
    ///
    /// A stored value that is not a valid snapshot is logged and treated as
    /// missing. Missing or `null` fields read as 0.
    pub async fn load(&self) -> Result<TransferInputs, RepositoryError> {
        let Some(json) = self.repo.get_item(STORAGE_KEY).await? else {
            debug!("no saved inputs, starting from zero");
            return Ok(TransferInputs::default());
        };

        match serde_json::from_str(&json) {
            Ok(inputs) => Ok(inputs),
            Err(error) => {
                warn!(%error, "ignoring unreadable saved inputs");
                Ok(TransferInputs::default())
            }
        }
    }

    /// Save `inputs` if every field is non-negative.
    ///
    /// Returns whether the snapshot was written.
    pub async fn save(
        &self,
        inputs: &TransferInputs,
    ) -> Result<bool, RepositoryError> {
        if !inputs.is_persistable() {
            debug!(?inputs, "negative input, keeping previous saved inputs");
            return Ok(false);
        }

        let json = serde_json::to_string(inputs)?;
        self.repo.set_item(STORAGE_KEY, &json).await?;
        Ok(true)
    }

    /// Forget the saved snapshot.
    pub async fn clear(&self) -> Result<(), RepositoryError> {
        self.repo.remove_item(STORAGE_KEY).await
    }
}
