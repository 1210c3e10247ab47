//! Product owners.
//!
//! Owners are referenced from [`crate::domain::Product`] by [`UserId`] and
//! fetched separately through the `UserService` port; they are never embedded
//! in a product.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Author name used when an owner has not set one.
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// Validation errors for [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    EmptyId,
    /// The identifier had leading or trailing whitespace.
    #[error("user id must not contain surrounding whitespace")]
    UntrimmedId,
}

/// Opaque identifier of a user, as issued by the user store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and wrap an identifier.
    ///
    /// # Examples
    /// ```
    /// use orbital_backend::domain::UserId;
    ///
    /// assert!(UserId::new("5f4e1c").is_ok());
    /// assert!(UserId::new(" 5f4e1c").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::UntrimmedId);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Social network profile links registered by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Networks {
    /// Twitter profile URL, e.g. `https://twitter.com/orbital`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// Personal website URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl Networks {
    /// Twitter handle derived from the profile URL.
    ///
    /// The handle is the last non-empty path segment prefixed with `@`, so
    /// `https://twitter.com/orbital/` yields `@orbital`.
    ///
    /// # Examples
    /// ```
    /// use orbital_backend::domain::Networks;
    ///
    /// let networks = Networks {
    ///     twitter: Some("https://twitter.com/orbital".to_owned()),
    ///     ..Networks::default()
    /// };
    /// assert_eq!(networks.twitter_handle().as_deref(), Some("@orbital"));
    /// ```
    #[must_use]
    pub fn twitter_handle(&self) -> Option<String> {
        let url = self.twitter.as_deref()?;
        let segment = url
            .split('/')
            .map(str::trim)
            .rev()
            .find(|segment| !segment.is_empty())?;
        Some(format!("@{}", segment.trim_start_matches('@')))
    }
}

/// A marketplace user who owns products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Display name; may be blank.
    #[serde(default)]
    pub name: String,
    /// Registered social profiles.
    #[serde(default)]
    pub networks: Networks,
}

impl User {
    /// Name to credit as author, falling back to [`UNKNOWN_AUTHOR`].
    #[must_use]
    pub fn author_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() { UNKNOWN_AUTHOR } else { name }
    }
}
