pub mod model;

use crate::AppState;
use crate::domain::ListQuery;
use crate::error::AppResult;
use crate::features::auth_user::AuthUser;
use crate::features::crud::{self, parse_id};
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use model::{ADMIN_ROLES, USERS, UserForm};
use serde_json::{Value, json};

// every user route needs a token, reads included
pub fn users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(crud::create::<UserForm>))
        .route("/me", get(current_user))
        .route("/non-admin", get(list_non_admin_users))
        .route(
            "/{id}",
            get(show_user)
                .put(crud::update::<UserForm>)
                .delete(crud::destroy::<UserForm>),
        )
}

async fn list_users(State(state): State<AppState>, _user: AuthUser) -> AppResult<Json<Value>> {
    let users = state.manager.list(&USERS, &ListQuery::default()).await?;
    Ok(Json(json!({ "data": users })))
}

async fn list_non_admin_users(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Value>> {
    let query = ListQuery::excluding("role", ADMIN_ROLES);
    let users = state.manager.list(&USERS, &query).await?;
    Ok(Json(json!({ "data": users })))
}

async fn current_user(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Value>> {
    let record = state.manager.get(&USERS, user.user_id).await?;
    Ok(Json(json!({ "data": record })))
}

async fn show_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let record = state.manager.get(&USERS, parse_id(&id)?).await?;
    Ok(Json(json!({ "data": record })))
}
