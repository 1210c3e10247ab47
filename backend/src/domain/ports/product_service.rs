//! Driven port for product lookups and search.
//!
//! The product store owns matching and ranking; the domain only hands it
//! validated [`SearchCriteria`].

use async_trait::async_trait;

use crate::domain::{Error, Product, SearchCriteria};

use super::define_port_error;

define_port_error! {
    /// Errors raised by product store adapters.
    pub enum ProductServiceError {
        /// The store could not be reached.
        Connection { message: String } =>
            "product store connection failed: {message}",
        /// The store failed while executing the query or decoding results.
        Query { message: String } =>
            "product store query failed: {message}",
    }
}

/// Port for reading products.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Fetch a product by id or slug.
    ///
    /// Returns `Ok(None)` when nothing matches; absence is not an error.
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, ProductServiceError>;

    /// Return one page of products matching `criteria`, in the order the
    /// criteria request.
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Product>, ProductServiceError>;
}

impl From<ProductServiceError> for Error {
    fn from(err: ProductServiceError) -> Self {
        match err {
            ProductServiceError::Connection { message } => Error::service_unavailable(message),
            ProductServiceError::Query { message } => Error::internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(ProductServiceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(ProductServiceError::query("bad document"), ErrorCode::InternalError)]
    fn maps_to_domain_error(#[case] err: ProductServiceError, #[case] expected: ErrorCode) {
        assert_eq!(Error::from(err).code(), expected);
    }
}
