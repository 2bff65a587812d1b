use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use std::fmt;
use thiserror::Error;

/// Sentinel error kinds shared by the entity, repository and service layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("invalid email format")]
    InvalidEmail,

    #[error("name cannot be empty")]
    EmptyName,

    #[error("user not found")]
    UserNotFound,

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("invalid user data")]
    InvalidUser,
}

pub type UserResult<T> = Result<T, UserError>;

/// Error returned by [`crate::service::UserService`].
///
/// Wraps a [`UserError`] with the step that failed, e.g.
/// `failed to get user by ID: user not found`. Branch on [`ServiceError::kind`],
/// never on the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    context: Option<&'static str>,
    kind: UserError,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn new(context: &'static str, kind: UserError) -> Self {
        Self {
            context: Some(context),
            kind,
        }
    }

    pub fn kind(&self) -> UserError {
        self.kind
    }

    pub fn context(&self) -> Option<&'static str> {
        self.context
    }

    pub fn is(&self, kind: UserError) -> bool {
        self.kind == kind
    }
}

impl From<UserError> for ServiceError {
    fn from(kind: UserError) -> Self {
        Self {
            context: None,
            kind,
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.context {
            Some(context) => write!(f, "{}: {}", context, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Attach call-specific context to a [`UserResult`]
pub(crate) trait Context<T> {
    fn context(self, context: &'static str) -> ServiceResult<T>;
}

impl<T> Context<T> for UserResult<T> {
    fn context(self, context: &'static str) -> ServiceResult<T> {
        self.map_err(|kind| ServiceError::new(context, kind))
    }
}

/// Convert ServiceError to AppError for standardized error responses
impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        match err.kind() {
            UserError::UserNotFound => AppError::NotFound(message),
            UserError::UserAlreadyExists => AppError::Conflict(message),
            UserError::InvalidEmail | UserError::EmptyName | UserError::InvalidUser => {
                AppError::BadRequest(message)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_message_keeps_sentinel() {
        let err = ServiceError::new("failed to get user by ID", UserError::UserNotFound);

        assert_eq!(err.to_string(), "failed to get user by ID: user not found");
        assert!(err.is(UserError::UserNotFound));
        assert_eq!(err.context(), Some("failed to get user by ID"));
    }

    #[test]
    fn test_bare_error_has_no_context() {
        let err = ServiceError::from(UserError::UserAlreadyExists);

        assert_eq!(err.to_string(), "user already exists");
        assert_eq!(err.context(), None);
    }

    #[test]
    fn test_source_is_the_kind() {
        use std::error::Error;

        let err = ServiceError::new("failed to create user", UserError::EmptyName);
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("name cannot be empty"));
    }

    #[test]
    fn test_app_error_mapping() {
        let not_found: AppError =
            ServiceError::new("failed to get user by ID", UserError::UserNotFound).into();
        assert!(matches!(not_found, AppError::NotFound(ref m) if m == "failed to get user by ID: user not found"));

        let conflict: AppError = ServiceError::from(UserError::UserAlreadyExists).into();
        assert!(matches!(conflict, AppError::Conflict(_)));

        for kind in [UserError::InvalidEmail, UserError::EmptyName, UserError::InvalidUser] {
            let err: AppError = ServiceError::new("failed to create user", kind).into();
            assert!(matches!(err, AppError::BadRequest(_)), "{kind}");
        }
    }

    #[test]
    fn test_context_helper() {
        let result: UserResult<()> = Err(UserError::InvalidUser);
        let err = result.context("failed to save user").unwrap_err();
        assert_eq!(err.to_string(), "failed to save user: invalid user data");
    }
}
