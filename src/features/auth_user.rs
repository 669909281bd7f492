use crate::AppState;
use crate::error::AppError;
use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

/// The caller behind an `Authorization: Bearer <token>` header. Taking this as a
/// handler argument makes the route require a valid token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i64,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("Authorization token required".into()))?;

        let claims = state.auth.verify(token.trim())?;

        Ok(AuthUser {
            user_id: claims.user_id,
        })
    }
}
