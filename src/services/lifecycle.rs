use crate::database::{FileRef, ResourceStore, StoreError};
use crate::domain::{FieldValue, Fields, ListQuery, Record, ResourceSpec, slugify};
use crate::error::{AppError, AppResult};
use crate::io::BlobStore;
use axum::body::Bytes;
use chrono::Utc;

/// A file part taken from a request, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Coordinates the store and the blob directory so a row references at most one
/// live file. Holds no state of its own beyond the two handles.
pub struct ResourceManager {
    store: Box<dyn ResourceStore>,
    blobs: Box<dyn BlobStore>,
}

impl ResourceManager {
    pub fn new(store: Box<dyn ResourceStore>, blobs: Box<dyn BlobStore>) -> Self {
        Self { store, blobs }
    }

    pub async fn create(
        &self,
        spec: &ResourceSpec,
        mut fields: Fields,
        upload: Option<Upload>,
    ) -> AppResult<i64> {
        derive_slug(spec, &mut fields);

        let new_ref = self.write_upload(spec, upload, true).await?;
        if let (Some(column), Some(path)) = (spec.file_column(), &new_ref) {
            fields.insert(column.to_string(), FieldValue::from(path.as_str()));
        }

        match self.store.insert(spec, &fields, Utc::now()).await {
            Ok(id) => {
                tracing::info!(resource = %spec, id, "created");
                Ok(id)
            }
            Err(e) => {
                self.discard(new_ref).await;
                Err(AppError::store("Failed to create data", e))
            }
        }
    }

    pub async fn update(
        &self,
        spec: &ResourceSpec,
        id: i64,
        mut fields: Fields,
        upload: Option<Upload>,
    ) -> AppResult<()> {
        // nothing gets written for a record that isn't there
        let exists = self
            .store
            .file_ref(spec, id)
            .await
            .map_err(|e| AppError::store("Failed to get data", e))?;
        if exists.is_none() {
            return Err(AppError::NotFound(spec.not_found_message()));
        }

        derive_slug(spec, &mut fields);

        let new_ref = self.write_upload(spec, upload, false).await?;
        if let (Some(column), Some(path)) = (spec.file_column(), &new_ref) {
            fields.insert(column.to_string(), FieldValue::from(path.as_str()));
        }

        match self.store.update(spec, id, &fields, Utc::now()).await {
            Ok(Some(previous)) => {
                tracing::info!(resource = %spec, id, "updated");
                if new_ref.is_some() {
                    self.discard(previous).await;
                }
                Ok(())
            }
            // removed between the check and the write
            Ok(None) => {
                self.discard(new_ref).await;
                Err(AppError::NotFound(spec.not_found_message()))
            }
            Err(StoreError::Conflict) => {
                self.discard(new_ref).await;
                Err(spec
                    .update_conflict
                    .map(|message| AppError::Conflict(message.to_string()))
                    .unwrap_or_else(AppError::already_exists))
            }
            Err(e) => {
                self.discard(new_ref).await;
                Err(AppError::store("Failed to update data", e))
            }
        }
    }

    pub async fn delete(&self, spec: &ResourceSpec, id: i64) -> AppResult<()> {
        let previous = self
            .store
            .delete(spec, id)
            .await
            .map_err(|e| AppError::store("Failed to delete data", e))?
            .ok_or_else(|| AppError::NotFound(spec.not_found_message()))?;

        tracing::info!(resource = %spec, id, "deleted");
        self.discard(previous).await;

        Ok(())
    }

    pub async fn list(&self, spec: &ResourceSpec, query: &ListQuery) -> AppResult<Vec<Record>> {
        self.store
            .list(spec, query)
            .await
            .map_err(|e| AppError::store("Failed to get data", e))
    }

    pub async fn get(&self, spec: &ResourceSpec, id: i64) -> AppResult<Record> {
        self.store
            .get(spec, id)
            .await
            .map_err(|e| AppError::store("Failed to get data", e))?
            .ok_or_else(|| AppError::NotFound(spec.not_found_message()))
    }

    /// The row with the lowest id, for resources that hold a single record.
    pub async fn first(&self, spec: &ResourceSpec) -> AppResult<Option<Record>> {
        self.store
            .first(spec)
            .await
            .map_err(|e| AppError::store("Failed to get data", e))
    }

    pub async fn increment(
        &self,
        spec: &ResourceSpec,
        counter: &str,
        key_column: &str,
        key: &str,
    ) -> AppResult<()> {
        let matched = self
            .store
            .increment(spec, counter, key_column, key)
            .await
            .map_err(|e| AppError::store("Failed to update data", e))?;

        if !matched {
            return Err(AppError::NotFound(spec.not_found_message()));
        }

        Ok(())
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.store
            .ping()
            .await
            .map_err(|e| AppError::store("Database unavailable", e))
    }

    // returns the public reference of the written file, None when the resource
    // has no file slot or nothing was uploaded
    async fn write_upload(
        &self,
        spec: &ResourceSpec,
        upload: Option<Upload>,
        creating: bool,
    ) -> AppResult<Option<String>> {
        let Some(slot) = spec.file else {
            return Ok(None);
        };

        match upload {
            Some(upload) => {
                let path = self
                    .blobs
                    .put(&upload.bytes, &upload.file_name)
                    .await
                    .map_err(|e| AppError::blob("Failed to upload file", e))?;
                Ok(Some(path))
            }
            None if creating && slot.required => Err(AppError::Validation(slot.missing_message())),
            None => Ok(None),
        }
    }

    // best effort: the row is already consistent, a leftover file is only logged
    async fn discard(&self, file_ref: FileRef) {
        let Some(path) = file_ref.filter(|p| !p.is_empty()) else {
            return;
        };

        if let Err(e) = self.blobs.remove(&path).await {
            tracing::warn!(file = %path, error = %e, "failed to remove file");
        }
    }
}

fn derive_slug(spec: &ResourceSpec, fields: &mut Fields) {
    let Some(source) = spec.slug_from else {
        return;
    };

    let mut slug = match fields.get(source) {
        Some(FieldValue::Text(value)) => slugify(value),
        _ => return,
    };
    // nothing alphanumeric in the title
    if slug.is_empty() {
        slug = uuid::Uuid::new_v4().simple().to_string()[..8].to_string();
    }
    fields.insert("slug".to_string(), FieldValue::Text(slug));
}
