pub mod model;

use crate::AppState;
use crate::features::crud;
use axum::Router;

pub fn services_router() -> Router<AppState> {
    crud::resource_router::<model::ServiceForm>()
}
