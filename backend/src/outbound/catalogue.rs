//! In-memory product and user store seeded from a JSON catalogue.
//!
//! Implements both [`ProductService`] and [`UserService`] so the service can
//! run without an external store. Data is immutable after construction.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::io;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::domain::ports::{ProductService, ProductServiceError, UserService, UserServiceError};
use crate::domain::{Product, SearchCriteria, SortDirection, SortField, User, UserId};

/// Catalogue file contents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogueSeed {
    /// Products to serve.
    #[serde(default)]
    pub products: Vec<Product>,
    /// Product owners.
    #[serde(default)]
    pub users: Vec<User>,
}

/// Immutable in-memory catalogue.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogue {
    products: Vec<Product>,
    users: HashMap<UserId, User>,
}

impl InMemoryCatalogue {
    /// Build a catalogue from already-decoded seed data.
    #[must_use]
    pub fn from_seed(seed: CatalogueSeed) -> Self {
        let users = seed
            .users
            .into_iter()
            .map(|user| (user.id.clone(), user))
            .collect();
        Self {
            products: seed.products,
            users,
        }
    }

    /// Read and decode a JSON catalogue file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be read, or an
    /// `InvalidData` error when it is not a valid catalogue.
    pub fn load(path: &Path) -> io::Result<Self> {
        let raw = std::fs::read(path)?;
        let seed: CatalogueSeed = serde_json::from_slice(&raw)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        let catalogue = Self::from_seed(seed);
        info!(
            path = %path.display(),
            products = catalogue.products.len(),
            users = catalogue.users.len(),
            "loaded product catalogue"
        );
        Ok(catalogue)
    }

    /// Number of products held.
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    fn matches(product: &Product, criteria: &SearchCriteria) -> bool {
        let text_matches = criteria.search_text().is_none_or(|text| {
            let needle = text.to_lowercase();
            product.title.to_lowercase().contains(&needle)
                || product.description.short.to_lowercase().contains(&needle)
        });
        let discount_matches = !criteria.discounted_only() || product.is_discounted();
        let price_matches = criteria
            .price()
            .is_none_or(|range| range.contains(product.price.value));
        let engine_matches = criteria
            .engine()
            .is_none_or(|engine| product.computed.engine.overlaps(engine));
        text_matches && discount_matches && price_matches && engine_matches
    }
}

fn compare(a: &Product, b: &Product, field: SortField) -> Ordering {
    match field {
        SortField::Popularity => a.cmp_popularity(b),
        SortField::ReleaseDate => a.release_date.cmp(&b.release_date),
        SortField::Reviews => a.total_ratings().cmp(&b.total_ratings()),
        SortField::Name => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}

#[async_trait]
impl ProductService for InMemoryCatalogue {
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, ProductServiceError> {
        Ok(self
            .products
            .iter()
            .find(|product| product.matches_key(id))
            .cloned())
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Product>, ProductServiceError> {
        let mut hits: Vec<&Product> = self
            .products
            .iter()
            .filter(|product| Self::matches(product, criteria))
            .collect();

        hits.sort_by(|a, b| {
            let primary = match criteria.sort_direction() {
                SortDirection::Asc => compare(a, b, criteria.sort_field()),
                SortDirection::Desc => compare(b, a, criteria.sort_field()),
            };
            primary.then_with(|| a.title.cmp(&b.title))
        });

        let skip = usize::try_from(criteria.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(criteria.limit()).unwrap_or(usize::MAX);
        Ok(hits.into_iter().skip(skip).take(limit).cloned().collect())
    }
}

#[async_trait]
impl UserService for InMemoryCatalogue {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserServiceError> {
        Ok(self.users.get(id).cloned())
    }
}
