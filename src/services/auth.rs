use crate::database::CredentialStore;
use crate::error::{AppError, AppResult};
use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub iat: i64,
    pub exp: i64,
}

/// Password checks against the users table and HS256 token issuance.
pub struct AuthService {
    credentials: Box<dyn CredentialStore>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    /// Checked against when the email is unknown, so both rejections cost one argon2 run.
    pub(crate) dummy_hash: Option<String>,
}

impl AuthService {
    pub fn new(credentials: Box<dyn CredentialStore>, secret: &str, ttl_hours: i64) -> Self {
        Self {
            credentials,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
            dummy_hash: hash_password("not-a-real-password").ok(),
        }
    }

    /// Returns a signed token for the user, or the same 401 for an unknown email
    /// and a wrong password.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<String> {
        let found = self
            .credentials
            .find_credentials(email)
            .await
            .map_err(|e| AppError::store("Failed to get data", e))?;

        let Some(credentials) = found else {
            if let Some(hash) = &self.dummy_hash {
                let _ = verify_password(password, hash);
            }
            return Err(AppError::invalid_credentials());
        };

        if !verify_password(password, &credentials.password_hash)? {
            tracing::info!(user_id = credentials.id, "rejected login");
            return Err(AppError::invalid_credentials());
        }

        self.issue(credentials.id)
    }

    pub fn issue(&self, user_id: i64) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {e}")))
    }

    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))
    }
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hash error: {e}")))
}

/// An unparseable stored hash is a server fault, a mismatch is just `false`.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Password verify error: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
