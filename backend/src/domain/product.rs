//! Marketplace product entity.
//!
//! Products are owned by the external product store and are read-only here.
//! The serde representation matches the store's document shape (`_id`,
//! camelCase fields), which is also the "full product" wire shape.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Validation errors for [`ProductId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductValidationError {
    /// The identifier was empty.
    #[error("product id must not be empty")]
    EmptyId,
    /// The identifier had leading or trailing whitespace.
    #[error("product id must not contain surrounding whitespace")]
    UntrimmedId,
}

/// Opaque identifier of a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Validate and wrap an identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, ProductValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ProductValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(ProductValidationError::UntrimmedId);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProductId {
    type Error = ProductValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

/// List price in minor currency units (cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Price before any discount.
    pub value: u64,
    /// Discount amount, in minor units, when the store reports one inline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u64>,
}

/// Active discount, in minor currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    /// Discount amount.
    pub value: u64,
}

/// Descriptive texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    /// One-paragraph summary; used for meta descriptions.
    #[serde(default)]
    pub short: String,
    /// Full description.
    #[serde(default)]
    pub long: String,
    /// Technical details.
    #[serde(default)]
    pub technical: String,
}

/// Picture URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pictures {
    /// Thumbnails; the first one is the primary image.
    #[serde(default)]
    pub thumbnail: Vec<String>,
    /// Screenshots shown on the product page.
    #[serde(default)]
    pub screenshot: Vec<String>,
}

/// Aggregate review score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    /// Ranking score used for popularity ordering.
    #[serde(default)]
    pub value: f64,
    /// Number of ratings received.
    #[serde(default)]
    pub total_ratings: u64,
    /// Mean rating normalised to `0.0..=1.0`.
    #[serde(default)]
    pub mean_rating: f64,
}

/// Supported engine version range, as version component vectors (`[5, 1]`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineRange {
    /// Oldest supported engine version.
    #[serde(default)]
    pub min: Vec<u32>,
    /// Newest supported engine version.
    #[serde(default)]
    pub max: Vec<u32>,
}

impl EngineRange {
    /// Whether two version ranges share at least one version.
    ///
    /// Empty bounds are open-ended.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let starts_before_other_ends =
            self.min.is_empty() || other.max.is_empty() || self.min <= other.max;
        let ends_after_other_starts =
            self.max.is_empty() || other.min.is_empty() || self.max >= other.min;
        starts_before_other_ends && ends_after_other_starts
    }
}

/// Fields computed by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Computed {
    /// Review score, absent until the first rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    /// Whether the product is promoted.
    #[serde(default)]
    pub is_boosted: bool,
    /// Supported engine versions.
    #[serde(default)]
    pub engine: EngineRange,
}

/// A marketplace product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display title; untrusted text.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Reference to the owning [`crate::domain::User`].
    pub owner: UserId,
    /// Publication time.
    pub release_date: DateTime<Utc>,
    /// List price.
    pub price: Price,
    /// Active discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
    /// Descriptive texts.
    #[serde(default)]
    pub description: Description,
    /// Picture URLs.
    #[serde(default)]
    pub pictures: Pictures,
    /// Store-computed fields.
    #[serde(default)]
    pub computed: Computed,
}

impl Product {
    /// First thumbnail, used as the social preview image.
    #[must_use]
    pub fn primary_thumbnail(&self) -> Option<&str> {
        self.pictures.thumbnail.first().map(String::as_str)
    }

    /// List price in major units, e.g. `1999` cents becomes `19.99`.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "prices stay far below 2^52 minor units"
    )]
    pub fn price_in_major_units(&self) -> f64 {
        self.price.value as f64 / 100.0
    }

    /// Whether any discount applies.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.discount.is_some_and(|discount| discount.value > 0)
            || self.price.discount.is_some_and(|discount| discount > 0)
    }

    /// Number of ratings, zero when unrated.
    #[must_use]
    pub fn total_ratings(&self) -> u64 {
        self.computed.score.map_or(0, |score| score.total_ratings)
    }

    /// Popularity score, zero when unrated.
    #[must_use]
    pub fn popularity(&self) -> f64 {
        self.computed.score.map_or(0.0, |score| score.value)
    }

    /// Whether `key` names this product by id or by slug.
    #[must_use]
    pub fn matches_key(&self, key: &str) -> bool {
        self.id.as_str() == key || self.slug == key
    }

    /// Compare popularity scores, treating NaN as equal.
    #[must_use]
    pub fn cmp_popularity(&self, other: &Self) -> Ordering {
        self.popularity()
            .partial_cmp(&other.popularity())
            .unwrap_or(Ordering::Equal)
    }
}
