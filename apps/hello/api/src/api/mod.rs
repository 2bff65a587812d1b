use axum::Router;

pub mod hello;
pub mod users;

pub const USERS_PATH: &str = "/api/v1/users";

/// All application routes, with state applied.
///
/// `create_router` adds docs, middleware and the 404 fallback on top.
pub fn routes() -> Router {
    Router::new()
        .merge(hello::router())
        .nest(USERS_PATH, users::router())
}
