use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::{auth_handlers, handlers, state::AppState};

pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/contacts",
            get(handlers::list_contacts).post(handlers::create_contact),
        )
        .route(
            "/api/contacts/:id",
            get(handlers::get_contact)
                .put(handlers::update_contact)
                .delete(handlers::delete_contact),
        )
        .route("/api/contacts/:id/favorite", patch(handlers::toggle_favorite))
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(auth_handlers::register))
        .route("/api/auth/login", post(auth_handlers::login))
        .route("/api/auth/logout", post(auth_handlers::logout))
}

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
}
