use thiserror::Error;

use crate::domain::model::Outcome;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("feed endpoint returned status {status}")]
    RemoteStatus { status: u16 },

    #[error("feed payload too small: {size} bytes (minimum {min})")]
    PayloadTooSmall { size: usize, min: usize },

    #[error("missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("storage write failed: {message}")]
    Storage { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FeedError {
    /// Maps each error onto the outcome reported to the trigger.
    pub fn outcome(&self) -> Outcome {
        match self {
            FeedError::MissingConfig { .. }
            | FeedError::InvalidConfigValue { .. }
            | FeedError::PayloadTooSmall { .. } => Outcome::ValidationError,
            FeedError::RemoteStatus { .. } => Outcome::ClientError,
            FeedError::Transport(_) => Outcome::TransportError,
            FeedError::Storage { .. } | FeedError::Io(_) => Outcome::InternalError,
        }
    }

    /// Numeric status surfaced to the trigger: 400 for validation failures,
    /// the remote status for client errors, 500 otherwise.
    pub fn status_code(&self) -> u16 {
        match self {
            FeedError::MissingConfig { .. }
            | FeedError::InvalidConfigValue { .. }
            | FeedError::PayloadTooSmall { .. } => 400,
            FeedError::RemoteStatus { status } => *status,
            FeedError::Transport(_) | FeedError::Storage { .. } | FeedError::Io(_) => 500,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FeedError::MissingConfig { .. } | FeedError::InvalidConfigValue { .. } => {
                "Check the feed credentials and configuration values"
            }
            FeedError::PayloadTooSmall { .. } => {
                "Verify the feed credentials; the endpoint answered but returned no usable data"
            }
            FeedError::RemoteStatus { .. } => {
                "Check the endpoint status and credentials with the feed provider"
            }
            FeedError::Transport(_) => {
                "Check network connectivity; the next scheduled run will try again"
            }
            FeedError::Storage { .. } | FeedError::Io(_) => {
                "Check storage permissions and that the target bucket exists"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_map_to_400() {
        let errors = [
            FeedError::MissingConfig {
                field: "feed_password".to_string(),
            },
            FeedError::PayloadTooSmall { size: 10, min: 100 },
        ];

        for err in errors {
            assert_eq!(err.outcome(), Outcome::ValidationError);
            assert_eq!(err.status_code(), 400);
        }
    }

    #[test]
    fn test_remote_status_propagates_code() {
        let err = FeedError::RemoteStatus { status: 403 };
        assert_eq!(err.outcome(), Outcome::ClientError);
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_storage_failure_is_internal() {
        let err = FeedError::Storage {
            message: "access denied".to_string(),
        };
        assert_eq!(err.outcome(), Outcome::InternalError);
        assert_eq!(err.status_code(), 500);
    }
}
