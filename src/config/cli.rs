use std::fs;
use std::path::Path;

use crate::domain::model::{StorageTarget, StoredObject};
use crate::domain::ports::ObjectStore;
use crate::utils::error::Result;

/// Filesystem-backed store for local runs. The base directory plays the
/// bucket role; object metadata only exists in log output here.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl ObjectStore for LocalStorage {
    async fn put_object(&self, target: &StorageTarget, data: &[u8]) -> Result<StoredObject> {
        let full_path = Path::new(&self.base_path).join(&target.key);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)?;
        tracing::debug!(
            path = %full_path.display(),
            source = %target.metadata.source,
            "object written locally"
        );

        Ok(StoredObject {
            bucket: self.base_path.clone(),
            key: target.key.clone(),
            bytes: data.len(),
        })
    }
}
