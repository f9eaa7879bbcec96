use sqlx::SqlitePool;

use crate::config::Config;
use crate::documents::Letterhead;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
    /// Institution wording printed on work certificates.
    pub letterhead: Letterhead,
}
