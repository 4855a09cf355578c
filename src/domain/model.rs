use serde::{Deserialize, Serialize};

use crate::utils::error::{FeedError, Result};

/// Form credentials for the feed endpoint. Resolved from configuration at
/// invocation time, never persisted, never logged.
#[derive(Clone)]
pub struct Credentials {
    pub name: String,
    pub password: String,
    pub account_id: String,
}

impl Credentials {
    /// Builds credentials, rejecting any missing or blank field before a
    /// network call is attempted.
    pub fn new(name: &str, password: &str, account_id: &str) -> Result<Self> {
        for (field, value) in [
            ("feed_name", name),
            ("feed_password", password),
            ("feed_account_id", account_id),
        ] {
            if value.trim().is_empty() {
                return Err(FeedError::MissingConfig {
                    field: field.to_string(),
                });
            }
        }

        Ok(Self {
            name: name.to_string(),
            password: password.to_string(),
            account_id: account_id.to_string(),
        })
    }
}

impl std::fmt::Debug for Credentials {
    // Keeps the password and account id out of debug/log output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .field("account_id", &"<redacted>")
            .finish()
    }
}

/// Validated response from the feed endpoint.
#[derive(Debug, Clone)]
pub struct FeedPayload {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FeedPayload {
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Where and how one payload is written to object storage.
#[derive(Debug, Clone)]
pub struct StorageTarget {
    pub key: String,
    pub content_type: String,
    pub metadata: ObjectMetadata,
}

/// Metadata attached to every stored object.
#[derive(Debug, Clone)]
pub struct ObjectMetadata {
    pub source: String,
    /// Invocation/request identifier supplied by the trigger.
    pub timestamp: String,
}

/// Echo of a completed write.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    ValidationError,
    ClientError,
    TransportError,
    InternalError,
}

/// The sole value handed back to the trigger. Every run produces exactly one,
/// on every path.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationResult {
    pub outcome: Outcome,
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
}

impl InvocationResult {
    pub fn success(stored: &StoredObject) -> Self {
        Self {
            outcome: Outcome::Success,
            status_code: 200,
            message: format!(
                "feed stored to {}/{} ({} bytes)",
                stored.bucket, stored.key, stored.bytes
            ),
            bucket: Some(stored.bucket.clone()),
            key: Some(stored.key.clone()),
            bytes: Some(stored.bytes),
        }
    }

    pub fn from_error(err: &FeedError) -> Self {
        Self {
            outcome: err.outcome(),
            status_code: err.status_code(),
            message: err.to_string(),
            bucket: None,
            key: None,
            bytes: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}
