use crate::config::AdminSeed;
use crate::database::{ResourceStore, StoreError};
use crate::domain::{FieldValue, Fields};
use crate::features::users::model::USERS;
use crate::services::auth::hash_password;
use anyhow::{Result, anyhow};
use chrono::Utc;
use tracing::info;

/// Create the configured admin account unless a user with that email exists.
/// Returns whether a row was inserted.
pub async fn seed_admin(store: &dyn ResourceStore, admin: &AdminSeed) -> Result<bool> {
    let password_hash = hash_password(&admin.password).map_err(|e| anyhow!("{e}"))?;

    let mut fields = Fields::new();
    fields.insert("name".to_string(), FieldValue::from("Administrator"));
    fields.insert("email".to_string(), FieldValue::from(admin.email.as_str()));
    fields.insert("password".to_string(), FieldValue::from(password_hash));
    fields.insert("role".to_string(), FieldValue::from("admin"));

    match store.insert(&USERS, &fields, Utc::now()).await {
        Ok(id) => {
            info!(id, email = %admin.email, "Seeded admin user");
            Ok(true)
        }
        Err(StoreError::Conflict) => Ok(false),
        Err(e) => Err(anyhow!(e).context("Failed to seed admin user")),
    }
}
