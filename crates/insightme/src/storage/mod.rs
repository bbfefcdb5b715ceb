//! Durable storage for submitted response sets.

mod file;

pub use file::FileResponseStore;

use crate::assessment::ResponseSet;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Storage abstraction so the service can run against files or memory.
pub trait ResponseStore: Send + Sync {
    fn save(&self, set: &ResponseSet) -> Result<StoredResponseRef, StorageError>;
    fn load_latest(
        &self,
        user_id: &str,
        assessment_name: &str,
    ) -> Result<Option<ResponseSet>, StorageError>;
    /// Saved sets for one user and assessment, oldest first.
    fn list(
        &self,
        user_id: &str,
        assessment_name: &str,
    ) -> Result<Vec<StoredResponseRef>, StorageError>;
}

/// Pointer to a saved response set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredResponseRef {
    pub user_id: String,
    pub assessment_name: String,
    pub recorded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("response storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored response set is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("'{key}' cannot be used as a user id or assessment name")]
    InvalidKey { key: String },
}

/// Rejects keys that are empty or could escape the storage directory.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = key.trim().is_empty()
        || key.contains(['/', '\\'])
        || key.contains("..")
        || key.chars().any(char::is_control);
    if invalid {
        return Err(StorageError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_must_stay_inside_the_directory() {
        assert!(validate_key("user-01").is_ok());
        assert!(validate_key("Nguyễn Văn A").is_ok());

        for key in ["", "  ", "../etc", "a/b", "a\\b", "tab\there"] {
            match validate_key(key) {
                Err(StorageError::InvalidKey { key: rejected }) => assert_eq!(rejected, key),
                other => panic!("expected invalid key for {key:?}, got {other:?}"),
            }
        }
    }
}
