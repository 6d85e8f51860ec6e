//! Application state management.

/// Shared application state.
///
/// Cloned for each handler; the connection pool is reference counted, so
/// clones are cheap.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
