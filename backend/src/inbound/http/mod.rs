//! HTTP inbound adapter exposing the product API, SSR pages and probes.

pub mod error;
pub mod health;
pub mod pages;
pub mod products;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
