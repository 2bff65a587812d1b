use axum::Router;
use domain_users::{InMemoryUserRepository, UserService, handlers};

/// Users resource backed by the in-memory store; contents are lost on restart
pub fn router() -> Router {
    let repository = InMemoryUserRepository::new();
    let service = UserService::new(repository);
    handlers::router(service)
}
