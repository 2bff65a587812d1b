use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};

/// Accepted email shape: `local@domain.tld` with a top-level label of at least two letters
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Prefix of every generated user identifier
pub const USER_ID_PREFIX: &str = "user_";

/// Opaque user identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Generate a fresh, time-ordered identifier (`user_<uuidv7>`)
    pub fn generate() -> Self {
        Self(format!("{}{}", USER_ID_PREFIX, Uuid::now_v7().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email address that has passed [`validate_email`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(value: impl Into<String>) -> UserResult<Self> {
        let value = value.into();
        validate_email(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fails with [`UserError::InvalidEmail`] when empty or not shaped like `local@domain.tld`
pub fn validate_email(email: &str) -> UserResult<()> {
    if email.is_empty() || !EMAIL_PATTERN.is_match(email) {
        return Err(UserError::InvalidEmail);
    }
    Ok(())
}

/// Fails with [`UserError::EmptyName`] on an empty string. Whitespace is not trimmed.
pub fn validate_name(name: &str) -> UserResult<()> {
    if name.is_empty() {
        return Err(UserError::EmptyName);
    }
    Ok(())
}

/// User entity
///
/// Fields are private so a `User` built through [`User::new`], [`User::update`]
/// or [`User::with_changes`] always satisfies the email and name rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    email: Email,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Validate email (first) and name, then build a user with a fresh id
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> UserResult<Self> {
        let email = Email::parse(email)?;
        let name = name.into();
        validate_name(&name)?;

        let now = Utc::now();
        Ok(Self {
            id: UserId::generate(),
            email,
            name,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a user from stored parts without validation.
    ///
    /// Meant for storage adapters reading records back. Repositories run
    /// [`User::validate`] on every write, so an invalid restored value is
    /// rejected with [`UserError::InvalidUser`].
    pub fn restore(
        id: UserId,
        email: impl Into<String>,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email: Email(email.into()),
            name: name.into(),
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Re-check the email and name invariants
    pub fn validate(&self) -> UserResult<()> {
        validate_email(self.email.as_str())?;
        validate_name(&self.name)
    }

    /// Replace email and name in place. On error the user is left untouched.
    pub fn update(&mut self, email: impl Into<String>, name: impl Into<String>) -> UserResult<()> {
        *self = self.with_changes(email, name)?;
        Ok(())
    }

    /// Validated copy carrying the new email and name and an advanced `updated_at`
    pub fn with_changes(
        &self,
        email: impl Into<String>,
        name: impl Into<String>,
    ) -> UserResult<Self> {
        let email = Email::parse(email)?;
        let name = name.into();
        validate_name(&name)?;

        Ok(Self {
            id: self.id.clone(),
            email,
            name,
            created_at: self.created_at,
            updated_at: next_timestamp(self.updated_at),
        })
    }

    /// Every user is active; there is no deactivation state yet
    pub fn is_active(&self) -> bool {
        true
    }
}

// Clock reads can repeat on coarse clocks; updated_at must strictly increase.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::nanoseconds(1)
    }
}
