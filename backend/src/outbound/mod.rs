//! Outbound adapters implementing domain ports, plus the typed API client.
//!
//! - **catalogue**: in-memory product and user store seeded from JSON
//! - **api_client**: reqwest client for the product API
//!
//! Adapters are thin translators between domain types and their external
//! representation. They contain no business logic.

pub mod api_client;
pub mod catalogue;

pub use api_client::{ApiClientError, ProductApiClient};
pub use catalogue::{CatalogueSeed, InMemoryCatalogue};
