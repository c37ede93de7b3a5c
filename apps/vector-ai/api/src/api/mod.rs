use axum::Router;

pub mod embeddings;
pub mod health;
pub mod index;
pub mod tables;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Table browsing and embedding endpoints share the `/db` prefix.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest(
        "/db",
        tables::router(state).merge(embeddings::router(state)),
    )
}

/// Router with the `/ready` endpoint, which pings MySQL.
///
/// Merged next to the stateless app router returned by `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// Router serving the endpoint directory at `/`.
pub fn index_router(port: u16) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(index::index_handler))
        .with_state(port)
}
