use anyhow::{Context, Result, bail};
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: String,
    pub upload_dir: PathBuf,
    pub upload_url_prefix: String,
    pub max_upload_bytes: usize,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub admin: Option<AdminSeed>,
}

/// Credentials for the admin account created on first start.
#[derive(Clone, Debug)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .context("Failed to determine DATABASE_URL from environment variables")?;

        let jwt_secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|secret| !secret.is_empty())
            .context("Failed to determine JWT_SECRET from environment variables")?;

        let max_connections = parsed_or("MAX_CONNECTIONS", 15u32);

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let upload_dir =
            PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string()));

        let upload_url_prefix = std::env::var("UPLOAD_URL_PREFIX")
            .unwrap_or_else(|_| "/uploads".to_string())
            .trim_end_matches('/')
            .to_string();
        if !upload_url_prefix.starts_with('/') || upload_url_prefix.len() < 2 {
            bail!("UPLOAD_URL_PREFIX must be an absolute path below the root, e.g. /uploads");
        }

        let max_upload_bytes = parsed_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024usize);

        // tokens live between one hour and one day
        let jwt_ttl_hours = parsed_or("JWT_TTL_HOURS", 1i64).clamp(1, 24);

        let admin = match (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
                Some(AdminSeed { email, password })
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            upload_dir,
            upload_url_prefix,
            max_upload_bytes,
            jwt_secret,
            jwt_ttl_hours,
            admin,
        })
    }
}
