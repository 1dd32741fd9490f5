pub mod auth;
pub mod auth_handlers;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod pagination;
pub mod repository;
pub mod response;
pub mod routes;
pub mod state;
pub mod validation;
