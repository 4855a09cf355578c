#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;

#[cfg(feature = "cli")]
use std::time::Duration;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};

/// Feed endpoint queried when no override is configured.
pub const DEFAULT_ENDPOINT: &str = "https://www.autocaris.cz/downloadcontent/cars.php";

/// Deterministic object key; reruns overwrite it unless timestamped keys are
/// enabled.
pub const DEFAULT_OBJECT_KEY: &str = "inzeraty/inzeraty_usti.xml";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A 2xx answer below this size is treated as a failed login or an empty
/// feed rather than a usable document.
pub const DEFAULT_MIN_PAYLOAD_BYTES: usize = 100;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "autocaris-sync")]
#[command(about = "Fetches the autocaris XML feed and stores it durably")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Feed login name. Blank credentials are rejected before any request
    /// is made.
    #[arg(long, default_value = "")]
    pub feed_name: String,

    #[arg(long, default_value = "")]
    pub feed_password: String,

    #[arg(long, default_value = "")]
    pub feed_account_id: String,

    /// Directory that plays the bucket role for local runs.
    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_OBJECT_KEY)]
    pub object_key: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[arg(long, default_value_t = DEFAULT_MIN_PAYLOAD_BYTES)]
    pub min_payload_bytes: usize,

    /// Store each run under a new timestamped key instead of overwriting.
    #[arg(long)]
    pub timestamped_keys: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn feed_name(&self) -> &str {
        &self.feed_name
    }

    fn feed_password(&self) -> &str {
        &self.feed_password
    }

    fn feed_account_id(&self) -> &str {
        &self.feed_account_id
    }

    fn object_key(&self) -> &str {
        &self.object_key
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn min_payload_bytes(&self) -> usize {
        self.min_payload_bytes
    }

    fn timestamped_keys(&self) -> bool {
        self.timestamped_keys
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    // Credentials are deliberately not checked here: the run itself
    // classifies them so the trigger gets a structured validation_error.
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)?;
        validate_non_empty_string("output_path", &self.output_path)?;
        validate_non_empty_string("object_key", &self.object_key)?;
        validate_range("timeout_secs", self.timeout_secs, 1, 300)?;
        validate_positive_number("min_payload_bytes", self.min_payload_bytes, 1)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            feed_name: String::new(),
            feed_password: String::new(),
            feed_account_id: String::new(),
            output_path: "./output".to_string(),
            object_key: DEFAULT_OBJECT_KEY.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            min_payload_bytes: DEFAULT_MIN_PAYLOAD_BYTES,
            timestamped_keys: false,
            verbose: false,
        }
    }

    #[test]
    fn test_default_config_validates() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let mut config = base_config();
        config.endpoint = "not-a-url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = base_config();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
