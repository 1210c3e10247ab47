//! Resolves a request path to a fully rendered HTML page.

use std::sync::Arc;

use tracing::{debug, error};

use super::{PageHead, PageTemplate, SiteMetadata, product_head, site_head};
use crate::domain::ports::{ProductService, UserService};
use crate::domain::{Error, Product};

/// Top-level page a request path addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRoute {
    /// `/`, or any path whose first segment is empty.
    Home,
    /// `/product/<slug>`.
    Product(String),
    /// `/search` and anything below it.
    Search,
    /// Any other first segment, or a product path without a slug.
    NotFound,
}

impl PageRoute {
    /// Classify a request path (without query string).
    ///
    /// # Examples
    /// ```
    /// use orbital_backend::domain::page::PageRoute;
    ///
    /// assert_eq!(PageRoute::classify("/"), PageRoute::Home);
    /// assert_eq!(
    ///     PageRoute::classify("/product/forest"),
    ///     PageRoute::Product("forest".to_owned())
    /// );
    /// assert_eq!(PageRoute::classify("/admin"), PageRoute::NotFound);
    /// ```
    #[must_use]
    pub fn classify(path: &str) -> Self {
        let mut segments = path.strip_prefix('/').unwrap_or(path).split('/');
        match segments.next().unwrap_or_default() {
            "" => Self::Home,
            "search" => Self::Search,
            "product" => match segments.next().map(str::trim) {
                Some(slug) if !slug.is_empty() => Self::Product(slug.to_owned()),
                _ => Self::NotFound,
            },
            _ => Self::NotFound,
        }
    }
}

/// Builds SSR pages from the shared template and the product/user ports.
#[derive(Clone)]
pub struct PageComposer {
    template: Arc<PageTemplate>,
    site: SiteMetadata,
    products: Arc<dyn ProductService>,
    users: Arc<dyn UserService>,
}

impl PageComposer {
    /// Create a composer over the given template and ports.
    pub fn new(
        template: Arc<PageTemplate>,
        site: SiteMetadata,
        products: Arc<dyn ProductService>,
        users: Arc<dyn UserService>,
    ) -> Self {
        Self {
            template,
            site,
            products,
            users,
        }
    }

    /// Site-wide metadata in use.
    #[must_use]
    pub fn site(&self) -> &SiteMetadata {
        &self.site
    }

    /// Render the page for `path`.
    ///
    /// # Errors
    /// - `not_found` for paths outside the page set and unknown products.
    /// - `internal_error` when a product's owner is missing.
    /// - Port failures, mapped through their `From` impls.
    pub async fn compose(&self, path: &str) -> Result<String, Error> {
        let head = match PageRoute::classify(path) {
            PageRoute::NotFound => return Err(Error::not_found("page not found")),
            PageRoute::Home | PageRoute::Search => site_head(&self.site),
            PageRoute::Product(slug) => {
                let product = self
                    .products
                    .find_by_id(&slug)
                    .await?
                    .ok_or_else(|| Error::not_found("product not found"))?;
                self.product_page_head(&product).await?
            }
        };
        debug!(path, "rendered page");
        Ok(self.template.render(&head))
    }

    async fn product_page_head(&self, product: &Product) -> Result<PageHead, Error> {
        let Some(owner) = self.users.find_by_id(&product.owner).await? else {
            error!(
                product_id = %product.id,
                owner_id = %product.owner,
                "product references missing owner"
            );
            return Err(Error::internal("product references missing owner"));
        };
        product_head(&self.site, product, &owner).map_err(|err| {
            error!(product_id = %product.id, error = %err, "failed to serialise json-ld");
            Error::internal("failed to render product metadata")
        })
    }
}
