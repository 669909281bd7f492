use crate::io::{BlobStore, opaque_name, resolve_in_root};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

pub struct LocalBlobStore {
    pub root_path: PathBuf,
    pub url_prefix: String,
}

impl LocalBlobStore {
    pub fn new(root_path: impl Into<PathBuf>, url_prefix: &str) -> Self {
        Self {
            root_path: root_path.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, bytes: &[u8], original_filename: &str) -> Result<String> {
        let name = opaque_name(original_filename);
        let path = self.root_path.join(&name);

        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write upload to {}", path.display()))?;

        Ok(format!("{}/{}", self.url_prefix, name))
    }

    async fn remove(&self, file_ref: &str) -> Result<()> {
        let path = resolve_in_root(&self.root_path, file_ref)?;

        tokio::fs::remove_file(&path)
            .await
            .with_context(|| format!("Failed to remove {}", path.display()))?;

        Ok(())
    }
}
