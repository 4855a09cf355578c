use std::env;
use std::time::Duration;

use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::Client as S3Client;

use crate::config::{
    DEFAULT_ENDPOINT, DEFAULT_MIN_PAYLOAD_BYTES, DEFAULT_OBJECT_KEY, DEFAULT_TIMEOUT_SECS,
};
use crate::domain::model::{StorageTarget, StoredObject};
use crate::domain::ports::{ConfigProvider, ObjectStore};
use crate::utils::error::{FeedError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub endpoint: String,
    pub feed_name: String,
    pub feed_password: String,
    pub feed_account_id: String,
    pub s3_bucket: String,
    pub s3_key: String,
    pub s3_region: String,
    pub timeout_secs: u64,
    pub min_payload_bytes: usize,
    pub timestamped_keys: bool,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            endpoint: env::var("FEED_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            // Absent credentials stay empty here; the run classifies them as
            // a validation error before any network call.
            feed_name: env::var("FEED_NAME").unwrap_or_default(),
            feed_password: env::var("FEED_PASSWORD").unwrap_or_default(),
            feed_account_id: env::var("FEED_ACCOUNT_ID").unwrap_or_default(),
            s3_bucket: env::var("S3_BUCKET").map_err(|_| FeedError::MissingConfig {
                field: "S3_BUCKET".to_string(),
            })?,
            s3_key: env::var("S3_KEY").unwrap_or_else(|_| DEFAULT_OBJECT_KEY.to_string()),
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "eu-central-1".to_string()),
            timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            min_payload_bytes: env::var("MIN_PAYLOAD_BYTES")
                .unwrap_or_else(|_| DEFAULT_MIN_PAYLOAD_BYTES.to_string())
                .parse()
                .unwrap_or(DEFAULT_MIN_PAYLOAD_BYTES),
            timestamped_keys: env::var("TIMESTAMPED_KEYS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }
}

impl ConfigProvider for LambdaConfig {
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
        &self.s3_key
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

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)?;
        validate_s3_bucket_name("s3_bucket", &self.s3_bucket)?;
        validate_non_empty_string("s3_key", &self.s3_key)?;
        validate_aws_region("s3_region", &self.s3_region)?;
        validate_range("timeout_secs", self.timeout_secs, 1, 300)?;
        validate_positive_number("min_payload_bytes", self.min_payload_bytes, 1)?;

        tracing::info!("Lambda configuration validation passed");
        Ok(())
    }
}

fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(FeedError::InvalidConfigValue {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name must be between 3 and 63 characters".to_string(),
        });
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(FeedError::InvalidConfigValue {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots"
                .to_string(),
        });
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(FeedError::InvalidConfigValue {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name cannot start or end with a hyphen".to_string(),
        });
    }

    Ok(())
}

fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(FeedError::InvalidConfigValue {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
}

impl S3Storage {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

impl ObjectStore for S3Storage {
    async fn put_object(&self, target: &StorageTarget, data: &[u8]) -> Result<StoredObject> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&target.key)
            .body(data.to_vec().into())
            .content_type(&target.content_type)
            .metadata("source", &target.metadata.source)
            .metadata("timestamp", &target.metadata.timestamp)
            .send()
            .await
            .map_err(|err| FeedError::Storage {
                message: format!(
                    "s3 put_object failed ({}): {}",
                    err.code().unwrap_or("unknown"),
                    err.message().unwrap_or("no further detail")
                ),
            })?;

        Ok(StoredObject {
            bucket: self.bucket.clone(),
            key: target.key.clone(),
            bytes: data.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_s3_bucket_name() {
        assert!(validate_s3_bucket_name("s3_bucket", "autocaris-data").is_ok());
        assert!(validate_s3_bucket_name("s3_bucket", "").is_err());
        assert!(validate_s3_bucket_name("s3_bucket", "ab").is_err());
        assert!(validate_s3_bucket_name("s3_bucket", "Bad-Bucket").is_err());
        assert!(validate_s3_bucket_name("s3_bucket", "-leading").is_err());
    }

    #[test]
    fn test_validate_aws_region() {
        assert!(validate_aws_region("s3_region", "eu-central-1").is_ok());
        assert!(validate_aws_region("s3_region", "").is_err());
        assert!(validate_aws_region("s3_region", "EU_CENTRAL").is_err());
    }
}
