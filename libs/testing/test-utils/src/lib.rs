//! Shared test utilities for domain testing
//!
//! - `TestDataBuilder`: deterministic, per-test emails, names and ids
//! - `assertions`: assertion helpers with readable failure messages
//!
//! # Usage
//!
//! ```
//! use test_utils::TestDataBuilder;
//!
//! let builder = TestDataBuilder::from_test_name("my_test");
//! let email = builder.email("alice");
//! let name = builder.name("user", "main");
//! assert!(email.ends_with("@example.com"));
//! assert!(name.starts_with("test-user-"));
//! ```

/// Builder for test data with deterministic randomization
///
/// The same test name always yields the same data, and different test
/// names yield different emails, so tests sharing a store do not collide.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate an email address accepted by the user email rule
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.email("bob"), "bob.7@example.com");
    /// ```
    pub fn email(&self, local: &str) -> String {
        format!("{}.{}@example.com", local, self.seed)
    }

    /// Generate a unique display name for testing
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(12345);
    /// assert_eq!(builder.name("user", "main"), "test-user-12345-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// An identifier that no store will have generated
    pub fn missing_id(&self) -> String {
        format!("missing_{}", self.seed)
    }
}

/// Test assertion helpers
pub mod assertions {
    use std::fmt::{Debug, Display};

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that a result failed with exactly this display message
    pub fn assert_err_message<T: Debug, E: Display>(result: Result<T, E>, expected: &str) {
        match result {
            Ok(value) => panic!("expected error '{}', got Ok({:?})", expected, value),
            Err(err) => assert_eq!(err.to_string(), expected),
        }
    }
}
