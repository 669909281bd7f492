pub mod model;

use crate::AppState;
use crate::features::crud;
use axum::Router;

pub fn portfolios_router() -> Router<AppState> {
    crud::resource_router::<model::PortfolioForm>()
}
