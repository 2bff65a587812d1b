//! Custom extractors for Axum handlers.

pub mod query;
pub mod validated_json;

pub use query::QueryParams;
pub use validated_json::ValidatedJson;
