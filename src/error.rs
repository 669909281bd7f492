use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::database::StoreError;

pub type AppResult<T> = std::result::Result<T, AppError>;

/// Every failure a handler can return. Each variant maps to one status code and
/// one JSON body shape.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Field-level validation failures, all of them, formatted `"<field> is <rule>"`.
    #[error("Invalid fields: {}", .0.join(", "))]
    InvalidFields(Vec<String>),

    /// Malformed request or missing upload.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{message}: {detail}")]
    Store { message: String, detail: String },

    #[error("{message}: {detail}")]
    Blob { message: String, detail: String },

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn already_exists() -> Self {
        AppError::Conflict("Data already exists".into())
    }

    pub fn invalid_credentials() -> Self {
        AppError::Unauthorized("Invalid email or password".into())
    }

    /// Wrap a store failure with the operation that was attempted.
    pub fn store(message: &str, err: StoreError) -> Self {
        match err {
            StoreError::Conflict => AppError::already_exists(),
            StoreError::InvalidReference => {
                AppError::Validation("Invalid related data".into())
            }
            StoreError::UnknownColumn(column) => {
                AppError::Internal(format!("Column {column} is not writable"))
            }
            StoreError::Database(e) => AppError::Store {
                message: message.to_string(),
                detail: e.to_string(),
            },
        }
    }

    pub fn blob(message: &str, err: anyhow::Error) -> Self {
        AppError::Blob {
            message: message.to_string(),
            detail: format!("{err:#}"),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidFields(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Store { .. } | AppError::Blob { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> Value {
        match self {
            AppError::InvalidFields(errors) => json!({ "errors": errors }),
            AppError::Store { message, detail } => json!({ "error": message, "detail": detail }),
            // blob failures carry filesystem paths, keep them in the log only
            AppError::Blob { message, .. } => json!({ "error": message }),
            AppError::Validation(message)
            | AppError::Unauthorized(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message)
            | AppError::Internal(message) => json!({ "error": message }),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(self.body())).into_response()
    }
}

/// `"<field> is <rule>"` for every failed rule, sorted.
pub fn field_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors
                .iter()
                .map(move |error| format!("{} is {}", field, error.code))
        })
        .collect();
    messages.sort();
    messages.dedup();
    messages
}
