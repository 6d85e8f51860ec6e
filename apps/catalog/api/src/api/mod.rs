use axum::Router;

pub mod catalog;
pub mod health;

/// Creates the API routes.
///
/// Returns a stateless Router (all sub-routers have state already applied).
/// Only the connection pool handle is cloned into the domain (cheap).
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().merge(catalog::router(state))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`. The /ready endpoint pings the database.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
