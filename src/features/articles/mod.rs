pub mod model;

use crate::AppState;
use crate::error::AppResult;
use crate::features::crud;
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use model::{ARTICLES, ArticleForm};
use serde_json::{Value, json};

pub fn articles_router() -> Router<AppState> {
    // `{id}` is the article slug here, the segment name has to match the item routes
    crud::resource_router::<ArticleForm>().route("/{id}/views", post(increment_views))
}

async fn increment_views(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Value>> {
    state
        .manager
        .increment(&ARTICLES, "views", "slug", &slug)
        .await?;

    Ok(Json(json!({ "message": "Views updated +1" })))
}
