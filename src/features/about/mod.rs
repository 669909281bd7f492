pub mod model;

use crate::AppState;
use crate::error::AppResult;
use crate::features::crud;
use axum::{Json, Router, extract::State, routing::get};
use model::{ABOUT, AboutForm};
use serde_json::{Value, json};

pub fn about_router() -> Router<AppState> {
    Router::new()
        .route("/", get(show_about).post(crud::create::<AboutForm>))
        .route(
            "/{id}",
            get(crud::show::<AboutForm>)
                .put(crud::update::<AboutForm>)
                .delete(crud::destroy::<AboutForm>),
        )
}

// the site has one about section, so the collection route returns it directly
async fn show_about(State(state): State<AppState>) -> AppResult<Json<Value>> {
    match state.manager.first(&ABOUT).await? {
        Some(record) => Ok(Json(json!({ "data": record }))),
        None => Ok(Json(json!({ "message": "No data found" }))),
    }
}
