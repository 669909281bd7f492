pub mod about;
pub mod articles;
pub mod auth;
pub mod auth_user;
pub mod contacts;
pub mod crud;
pub mod faqs;
pub mod form;
pub mod pages;
pub mod portfolios;
pub mod services;
pub mod users;

use crate::AppState;
use axum::Router;

// api router, where features are composed
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(auth::auth_router())
        .nest("/about", about::about_router())
        .nest("/articles", articles::articles_router())
        .nest("/contacts", contacts::contacts_router())
        .nest("/faqs", faqs::faqs_router())
        .nest("/pages", pages::pages_router())
        .nest("/portfolios", portfolios::portfolios_router())
        .nest("/services", services::services_router())
        .nest("/users", users::users_router())
}
