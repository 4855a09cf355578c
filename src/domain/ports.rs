use std::time::Duration;

use async_trait::async_trait;

use crate::domain::model::{FeedPayload, StorageTarget, StoredObject};
use crate::utils::error::Result;

pub trait ObjectStore: Send + Sync {
    fn put_object(
        &self,
        target: &StorageTarget,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<StoredObject>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn feed_name(&self) -> &str;
    fn feed_password(&self) -> &str;
    fn feed_account_id(&self) -> &str;
    fn object_key(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn min_payload_bytes(&self) -> usize;
    fn timestamped_keys(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn fetch(&self) -> Result<FeedPayload>;
    async fn store(&self, payload: &FeedPayload, invocation_id: &str) -> Result<StoredObject>;
}
