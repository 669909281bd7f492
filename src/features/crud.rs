use crate::AppState;
use crate::domain::{Fields, ListQuery, ResourceSpec};
use crate::error::{AppError, AppResult};
use crate::features::auth_user::AuthUser;
use crate::features::form::{FormData, FormFields, Mode};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde_json::{Value, json};

/// A resource's form plus the static table description it writes into.
pub trait ResourceForm: FormFields + Send + 'static {
    const SPEC: &'static ResourceSpec;

    /// Column values for the store. Only submitted fields are present.
    fn into_fields(self) -> AppResult<Fields>;
}

/// `GET /` and `GET /{id}` are public, writes need a token.
pub fn resource_router<F: ResourceForm>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<F>).post(create::<F>))
        .route(
            "/{id}",
            get(show::<F>).put(update::<F>).delete(destroy::<F>),
        )
}

pub fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| AppError::Validation("Invalid ID".into()))
}

pub async fn list<F: ResourceForm>(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let records = state.manager.list(F::SPEC, &ListQuery::default()).await?;
    Ok(Json(json!({ "data": records })))
}

pub async fn show<F: ResourceForm>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let record = state.manager.get(F::SPEC, parse_id(&id)?).await?;
    Ok(Json(json!({ "data": record })))
}

pub async fn create<F: ResourceForm>(
    State(state): State<AppState>,
    _user: AuthUser,
    mut form: FormData,
) -> AppResult<(StatusCode, Json<Value>)> {
    let fields = form.parse::<F>(Mode::Create)?.into_fields()?;
    let upload = form.take_file(F::SPEC.file_column());

    let id = state.manager.create(F::SPEC, fields, upload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Data created successfully", "id": id })),
    ))
}

pub async fn update<F: ResourceForm>(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
    mut form: FormData,
) -> AppResult<Json<Value>> {
    let id = parse_id(&id)?;
    let fields = form.parse::<F>(Mode::Update)?.into_fields()?;
    let upload = form.take_file(F::SPEC.file_column());

    state.manager.update(F::SPEC, id, fields, upload).await?;

    Ok(Json(json!({ "message": "Data updated successfully" })))
}

pub async fn destroy<F: ResourceForm>(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    state.manager.delete(F::SPEC, parse_id(&id)?).await?;
    Ok(Json(json!({ "message": "Data deleted successfully" })))
}
