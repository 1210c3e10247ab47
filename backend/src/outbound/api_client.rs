//! Typed reqwest client for the product API.
//!
//! The client owns transport details only: URL construction, the request
//! timeout, HTTP status mapping and JSON decoding into [`Product`]. It never
//! retries.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::domain::Product;

/// Failures returned by [`ProductApiClient`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiClientError {
    /// The API answered 404 for the requested id.
    #[error("product not found")]
    NotFound,
    /// The API answered with another non-success status.
    #[error("product api returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Compacted prefix of the response body.
        body: String,
    },
    /// The request could not be sent or the response not read.
    #[error("product api transport failed: {message}")]
    Transport {
        /// Underlying error text.
        message: String,
    },
    /// The request exceeded the configured timeout.
    #[error("product api request timed out: {message}")]
    Timeout {
        /// Underlying error text.
        message: String,
    },
    /// The response body was not a product document.
    #[error("product api returned an invalid payload: {message}")]
    Decode {
        /// Decoder error text.
        message: String,
    },
    /// The base URL cannot carry a path.
    #[error("invalid product api url: {message}")]
    InvalidUrl {
        /// Why the URL was rejected.
        message: String,
    },
}

/// Client for `GET {base}/products/product/{id}`.
#[derive(Debug, Clone)]
pub struct ProductApiClient {
    client: Client,
    base_url: Url,
}

impl ProductApiClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the full product addressed by `id` (an id or a slug).
    ///
    /// # Errors
    ///
    /// See [`ApiClientError`]; a 404 maps to [`ApiClientError::NotFound`].
    pub async fn get_by_id(&self, id: &str) -> Result<Product, ApiClientError> {
        let url = self.product_url(id)?;
        debug!(%url, "fetching product");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        serde_json::from_slice(&body).map_err(|error| ApiClientError::Decode {
            message: error.to_string(),
        })
    }

    fn product_url(&self, id: &str) -> Result<Url, ApiClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiClientError::InvalidUrl {
                message: format!("{} cannot be a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(["products", "product", id]);
        Ok(url)
    }
}

fn map_transport_error(error: reqwest::Error) -> ApiClientError {
    if error.is_timeout() {
        ApiClientError::Timeout {
            message: error.to_string(),
        }
    } else {
        ApiClientError::Transport {
            message: error.to_string(),
        }
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiClientError {
    if status == StatusCode::NOT_FOUND {
        return ApiClientError::NotFound;
    }
    ApiClientError::Status {
        status: status.as_u16(),
        body: body_preview(body),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Non-network coverage; end-to-end requests live in `tests/api_client.rs`.

    use super::*;
    use rstest::rstest;

    fn client(base: &str) -> ProductApiClient {
        ProductApiClient::new(Url::parse(base).expect("url"), Duration::from_secs(1))
            .expect("client")
    }

    #[rstest]
    #[case("http://api.test", "http://api.test/products/product/abc")]
    #[case("http://api.test/", "http://api.test/products/product/abc")]
    #[case("http://api.test/v1/", "http://api.test/v1/products/product/abc")]
    fn joins_product_path(#[case] base: &str, #[case] expected: &str) {
        let url = client(base).product_url("abc").expect("url");
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn encodes_ids_as_a_single_segment() {
        let url = client("http://api.test").product_url("a/b c").expect("url");
        assert_eq!(url.as_str(), "http://api.test/products/product/a%2Fb%20c");
    }

    #[test]
    fn rejects_cannot_be_a_base_urls() {
        let err = client("mailto:ops@example.test")
            .product_url("abc")
            .expect_err("not a base");
        assert!(matches!(err, ApiClientError::InvalidUrl { .. }));
    }

    #[rstest]
    #[case(StatusCode::NOT_FOUND, ApiClientError::NotFound)]
    #[case(
        StatusCode::SERVICE_UNAVAILABLE,
        ApiClientError::Status { status: 503, body: "{\"code\": \"service_unavailable\"}".to_owned() }
    )]
    fn maps_statuses(#[case] status: StatusCode, #[case] expected: ApiClientError) {
        let body = b"{\"code\":\n \"service_unavailable\"}";
        assert_eq!(map_status_error(status, body), expected);
    }

    #[test]
    fn truncates_long_bodies() {
        let body = "x".repeat(200);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.len(), 163);
        assert!(preview.ends_with("..."));
    }
}
