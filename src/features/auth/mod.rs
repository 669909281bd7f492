use crate::AppState;
use crate::error::AppResult;
use crate::features::form::{FormData, FormFields, Mode};
use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use serde_json::{Value, json};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, code = "required"))]
    pub password: Option<String>,
}

impl FormFields for LoginForm {
    const REQUIRED: &'static [&'static str] = &["email", "password"];
}

pub fn auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

async fn login(State(state): State<AppState>, form: FormData) -> AppResult<Json<Value>> {
    let login = form.parse::<LoginForm>(Mode::Create)?;
    let email = login.email.unwrap_or_default();
    let password = login.password.unwrap_or_default();

    let token = state.auth.authenticate(&email, &password).await?;

    Ok(Json(json!({ "message": "Login successfully", "token": token })))
}
