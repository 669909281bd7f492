use anyhow::{Result, bail};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

pub mod local;

/// Storage for uploaded files. References handed out by `put` are the public
/// paths stored in the database, `remove` accepts the same references back.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, bytes: &[u8], original_filename: &str) -> Result<String>;
    async fn remove(&self, file_ref: &str) -> Result<()>;
}

/// `<uuid v4>.<ext>`, keeping only an alphanumeric extension from the client's filename.
pub fn opaque_name(original_filename: &str) -> String {
    let extension: String = Path::new(original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(10)
        .collect::<String>()
        .to_ascii_lowercase();

    let id = Uuid::new_v4();
    if extension.is_empty() {
        id.to_string()
    } else {
        format!("{id}.{extension}")
    }
}

// only the last component of a reference is trusted, and it must be a plain
// file name so the resolved path never leaves the root
pub fn resolve_in_root(root: &Path, file_ref: &str) -> Result<PathBuf> {
    let name = match Path::new(file_ref).components().next_back() {
        Some(Component::Normal(name)) => name,
        _ => bail!("Invalid file reference {file_ref}"),
    };

    Ok(root.join(name))
}
