use chrono::Utc;
use reqwest::Client;

use crate::core::{ConfigProvider, ObjectStore, Pipeline};
use crate::domain::model::{
    Credentials, FeedPayload, ObjectMetadata, StorageTarget, StoredObject,
};
use crate::utils::error::{FeedError, Result};

/// User agent presented to the feed endpoint.
pub const USER_AGENT: &str = concat!("autocaris-sync/", env!("CARGO_PKG_VERSION"));

/// Content type of every stored feed object.
pub const FEED_CONTENT_TYPE: &str = "application/xml";

/// Source tag attached to stored objects.
pub const SOURCE_TAG: &str = "autocaris";

pub struct FeedPipeline<S: ObjectStore, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: ObjectStore, C: ConfigProvider> FeedPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

/// Inserts a UTC stamp before the key's extension so each run creates a new
/// object instead of overwriting the deterministic key.
pub fn timestamped_key(base: &str, stamp: &str) -> String {
    match base.rsplit_once('.') {
        Some((stem, ext)) if !ext.contains('/') => format!("{}_{}.{}", stem, stamp, ext),
        _ => format!("{}_{}", base, stamp),
    }
}

#[async_trait::async_trait]
impl<S: ObjectStore, C: ConfigProvider> Pipeline for FeedPipeline<S, C> {
    async fn fetch(&self) -> Result<FeedPayload> {
        // Credentials are checked before any connection is opened.
        let credentials = Credentials::new(
            self.config.feed_name(),
            self.config.feed_password(),
            self.config.feed_account_id(),
        )?;

        // Fresh client per invocation; the handle is dropped on every exit
        // path, request included.
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.config.request_timeout())
            .build()?;

        let form = [
            ("name", credentials.name.as_str()),
            ("password", credentials.password.as_str()),
            ("id", credentials.account_id.as_str()),
        ];

        tracing::debug!(endpoint = %self.config.endpoint(), "requesting feed");
        let response = client
            .post(self.config.endpoint())
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "feed endpoint answered");

        if !status.is_success() {
            return Err(FeedError::RemoteStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?.to_vec();

        // A tiny 2xx body almost always means rejected credentials or an
        // empty feed, not a transport problem.
        let min = self.config.min_payload_bytes();
        if body.len() < min {
            return Err(FeedError::PayloadTooSmall {
                size: body.len(),
                min,
            });
        }

        Ok(FeedPayload {
            status: status.as_u16(),
            body,
        })
    }

    async fn store(&self, payload: &FeedPayload, invocation_id: &str) -> Result<StoredObject> {
        let key = if self.config.timestamped_keys() {
            let stamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
            timestamped_key(self.config.object_key(), &stamp)
        } else {
            self.config.object_key().to_string()
        };

        let target = StorageTarget {
            key,
            content_type: FEED_CONTENT_TYPE.to_string(),
            metadata: ObjectMetadata {
                source: SOURCE_TAG.to_string(),
                timestamp: invocation_id.to_string(),
            },
        };

        tracing::debug!(key = %target.key, bytes = payload.len(), "writing feed to storage");
        self.storage.put_object(&target, &payload.body).await
    }
}
