//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and services and remain testable without I/O.

use std::sync::Arc;

use crate::domain::page::PageComposer;
use crate::domain::ports::ProductService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Product lookups and search.
    pub products: Arc<dyn ProductService>,
    /// SSR page composer for the catch-all route.
    pub pages: Arc<PageComposer>,
}

impl HttpState {
    /// Bundle the product port and page composer.
    pub fn new(products: Arc<dyn ProductService>, pages: Arc<PageComposer>) -> Self {
        Self { products, pages }
    }
}
