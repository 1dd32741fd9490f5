use sqlx::PgPool;
use std::time::Instant;

use crate::repository::{ContactRepository, UserRepository};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub contacts: ContactRepository,
    pub users: UserRepository,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(db: PgPool) -> Self {
        Self {
            contacts: ContactRepository::new(db.clone()),
            users: UserRepository::new(db.clone()),
            db,
            started_at: Instant::now(),
        }
    }
}
