use crate::config::AppConfig;
use crate::database::sqlite::SqliteStore;
use crate::error::AppResult;
use crate::io::local::LocalBlobStore;
use crate::services::{AuthService, ResourceManager};
use anyhow::Context;
use axum::{Json, Router, extract::DefaultBodyLimit, extract::State, routing::get};
use serde_json::{Value, json};
use sqlx::Sqlite;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tokio::signal;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
mod database;
mod domain;
mod error;
mod features;
mod io;
mod seed;
mod services;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<ResourceManager>,
    pub auth: Arc<AuthService>,
    pub config: Arc<AppConfig>,
}

/// Full application: the json api under `/api`, uploaded files under the
/// configured prefix and a health probe.
pub fn app(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.config.upload_dir);
    let body_limit = state.config.max_upload_bytes;
    let upload_prefix = state.config.upload_url_prefix.clone();

    Router::new()
        .nest("/api", features::api_router())
        .nest_service(&upload_prefix, uploads)
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> AppResult<Json<Value>> {
    state.manager.ping().await?;
    Ok(Json(json!({ "status": "ok" })))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // determine environment variables
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // load centralized config
    let config = AppConfig::from_env()?;

    // verify db exists
    if !Sqlite::database_exists(&config.database_url)
        .await
        .unwrap_or(false)
    {
        info!("No database at {}, creating...", config.database_url);
        Sqlite::create_database(&config.database_url)
            .await
            .with_context(|| format!("Unable to create database at {}", config.database_url))?;
    }

    // connect to our db
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to create pool on {}", config.database_url))?;

    // run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to create {}", config.upload_dir.display()))?;

    let store = SqliteStore::new(pool.clone());

    if let Some(admin) = &config.admin {
        seed::seed_admin(&store, admin).await?;
    }

    let manager = ResourceManager::new(
        Box::new(store),
        Box::new(LocalBlobStore::new(
            config.upload_dir.clone(),
            &config.upload_url_prefix,
        )),
    );
    let auth = AuthService::new(
        Box::new(SqliteStore::new(pool.clone())),
        &config.jwt_secret,
        config.jwt_ttl_hours,
    );

    let app_state = AppState {
        manager: Arc::new(manager),
        auth: Arc::new(auth),
        config: Arc::new(config.clone()),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
