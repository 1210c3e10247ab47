//! Driven port for product owner lookups.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserServiceError {
        /// The store could not be reached.
        Connection { message: String } =>
            "user store connection failed: {message}",
        /// The store failed while executing the query or decoding results.
        Query { message: String } =>
            "user store query failed: {message}",
    }
}

/// Port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Fetch a user by id; `Ok(None)` when unknown.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserServiceError>;
}

impl From<UserServiceError> for Error {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::Connection { message } => Error::service_unavailable(message),
            UserServiceError::Query { message } => Error::internal(message),
        }
    }
}
