//! Product search criteria.
//!
//! Criteria live for a single request. Inbound adapters collect loosely typed
//! input into [`RawSearchCriteria`] and convert it with `TryFrom`, which is the
//! only way to obtain a [`SearchCriteria`] with non-default bounds.

use std::fmt;
use std::str::FromStr;

use super::EngineRange;

/// Page size used when the client does not ask for one.
pub const DEFAULT_LIMIT: u32 = 40;
/// Largest page size a client may request.
pub const MAX_LIMIT: u32 = 40;
/// Smallest page size a client may request.
pub const MIN_LIMIT: u32 = 1;

/// Field to order results by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Store-computed popularity score.
    #[default]
    Popularity,
    /// Publication time.
    ReleaseDate,
    /// Number of ratings.
    Reviews,
    /// Product title.
    Name,
}

impl SortField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::ReleaseDate => "releaseDate",
            Self::Reviews => "reviews",
            Self::Name => "name",
        }
    }
}

impl FromStr for SortField {
    type Err = SearchCriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity" => Ok(Self::Popularity),
            "releaseDate" => Ok(Self::ReleaseDate),
            "reviews" => Ok(Self::Reviews),
            "name" => Ok(Self::Name),
            other => Err(SearchCriteriaError::UnknownSortField {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result ordering direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl SortDirection {
    /// Wire name of the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = SearchCriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(SearchCriteriaError::UnknownSortDirection {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive price bounds in minor currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceRange {
    /// Lower bound, open when absent.
    pub min: Option<u64>,
    /// Upper bound, open when absent.
    pub max: Option<u64>,
}

impl PriceRange {
    /// Whether `value` falls within the bounds.
    #[must_use]
    pub fn contains(&self, value: u64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Reasons search input was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchCriteriaError {
    /// `skip` was negative.
    #[error("skip must be zero or greater")]
    SkipNegative,
    /// `limit` was outside `MIN_LIMIT..=MAX_LIMIT`.
    #[error("limit must be between {MIN_LIMIT} and {MAX_LIMIT}")]
    LimitOutOfRange,
    /// `sortField` was not one of the supported fields.
    #[error("sortField must be one of popularity, releaseDate, reviews, name")]
    UnknownSortField {
        /// Rejected input.
        value: String,
    },
    /// `sortDirection` was neither `asc` nor `desc`.
    #[error("sortDirection must be asc or desc")]
    UnknownSortDirection {
        /// Rejected input.
        value: String,
    },
    /// A price bound was negative.
    #[error("price bounds must be zero or greater")]
    PriceNegative,
    /// The lower price bound exceeded the upper one.
    #[error("price.min must not exceed price.max")]
    PriceRangeInverted,
}

impl SearchCriteriaError {
    /// Name of the offending request field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::SkipNegative => "skip",
            Self::LimitOutOfRange => "limit",
            Self::UnknownSortField { .. } => "sortField",
            Self::UnknownSortDirection { .. } => "sortDirection",
            Self::PriceNegative | Self::PriceRangeInverted => "price",
        }
    }

    /// Stable machine-readable reason.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SkipNegative => "skip_negative",
            Self::LimitOutOfRange => "limit_out_of_range",
            Self::UnknownSortField { .. } => "unknown_sort_field",
            Self::UnknownSortDirection { .. } => "unknown_sort_direction",
            Self::PriceNegative => "price_negative",
            Self::PriceRangeInverted => "price_range_inverted",
        }
    }
}

/// Unvalidated search input as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSearchCriteria {
    /// Number of results to skip.
    pub skip: Option<i64>,
    /// Page size.
    pub limit: Option<i64>,
    /// Free-text query.
    pub search_text: Option<String>,
    /// Sort field wire name.
    pub sort_field: Option<String>,
    /// Sort direction wire name.
    pub sort_direction: Option<String>,
    /// Engine version range filter.
    pub engine: Option<EngineRange>,
    /// Lower price bound in minor units.
    pub price_min: Option<i64>,
    /// Upper price bound in minor units.
    pub price_max: Option<i64>,
    /// Only return discounted products.
    pub discounted: Option<bool>,
}

/// Validated search criteria handed to the `ProductService` port.
///
/// # Examples
/// ```
/// use orbital_backend::domain::{RawSearchCriteria, SearchCriteria, SortDirection};
///
/// let criteria = SearchCriteria::try_from(RawSearchCriteria {
///     limit: Some(10),
///     sort_direction: Some("asc".to_owned()),
///     ..RawSearchCriteria::default()
/// })
/// .expect("valid criteria");
/// assert_eq!(criteria.limit(), 10);
/// assert_eq!(criteria.sort_direction(), SortDirection::Asc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    skip: u32,
    limit: u32,
    search_text: Option<String>,
    sort_field: SortField,
    sort_direction: SortDirection,
    engine: Option<EngineRange>,
    price: Option<PriceRange>,
    discounted: Option<bool>,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
            search_text: None,
            sort_field: SortField::default(),
            sort_direction: SortDirection::default(),
            engine: None,
            price: None,
            discounted: None,
        }
    }
}

impl SearchCriteria {
    /// Results to skip.
    #[must_use]
    pub fn skip(&self) -> u32 {
        self.skip
    }

    /// Page size, within `MIN_LIMIT..=MAX_LIMIT`.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Trimmed, non-empty free-text query.
    #[must_use]
    pub fn search_text(&self) -> Option<&str> {
        self.search_text.as_deref()
    }

    /// Sort field.
    #[must_use]
    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    /// Sort direction.
    #[must_use]
    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Engine version filter.
    #[must_use]
    pub fn engine(&self) -> Option<&EngineRange> {
        self.engine.as_ref()
    }

    /// Price filter.
    #[must_use]
    pub fn price(&self) -> Option<PriceRange> {
        self.price
    }

    /// Discounted-only filter; `Some(false)` and `None` both keep everything.
    #[must_use]
    pub fn discounted_only(&self) -> bool {
        self.discounted.unwrap_or(false)
    }
}

fn parse_skip(raw: Option<i64>) -> Result<u32, SearchCriteriaError> {
    match raw {
        None => Ok(0),
        Some(value) if value < 0 => Err(SearchCriteriaError::SkipNegative),
        // Anything beyond u32 skips past every result anyway.
        Some(value) => Ok(u32::try_from(value).unwrap_or(u32::MAX)),
    }
}

fn parse_limit(raw: Option<i64>) -> Result<u32, SearchCriteriaError> {
    let Some(value) = raw else {
        return Ok(DEFAULT_LIMIT);
    };
    u32::try_from(value)
        .ok()
        .filter(|limit| (MIN_LIMIT..=MAX_LIMIT).contains(limit))
        .ok_or(SearchCriteriaError::LimitOutOfRange)
}

fn parse_price_bound(raw: Option<i64>) -> Result<Option<u64>, SearchCriteriaError> {
    raw.map(|value| u64::try_from(value).map_err(|_| SearchCriteriaError::PriceNegative))
        .transpose()
}

fn parse_price(min: Option<i64>, max: Option<i64>) -> Result<Option<PriceRange>, SearchCriteriaError> {
    let range = PriceRange {
        min: parse_price_bound(min)?,
        max: parse_price_bound(max)?,
    };
    if let (Some(min), Some(max)) = (range.min, range.max) {
        if min > max {
            return Err(SearchCriteriaError::PriceRangeInverted);
        }
    }
    Ok((range != PriceRange::default()).then_some(range))
}

impl TryFrom<RawSearchCriteria> for SearchCriteria {
    type Error = SearchCriteriaError;

    fn try_from(raw: RawSearchCriteria) -> Result<Self, Self::Error> {
        let RawSearchCriteria {
            skip,
            limit,
            search_text,
            sort_field,
            sort_direction,
            engine,
            price_min,
            price_max,
            discounted,
        } = raw;

        Ok(Self {
            skip: parse_skip(skip)?,
            limit: parse_limit(limit)?,
            search_text: search_text
                .map(|text| text.trim().to_owned())
                .filter(|text| !text.is_empty()),
            sort_field: sort_field.as_deref().map(str::parse).transpose()?.unwrap_or_default(),
            sort_direction: sort_direction
                .as_deref()
                .map(str::parse)
                .transpose()?
                .unwrap_or_default(),
            engine,
            price: parse_price(price_min, price_max)?,
            discounted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_input_yields_defaults() {
        let criteria =
            SearchCriteria::try_from(RawSearchCriteria::default()).expect("defaults are valid");
        assert_eq!(criteria, SearchCriteria::default());
        assert_eq!(criteria.limit(), 40);
        assert_eq!(criteria.skip(), 0);
        assert_eq!(criteria.sort_field(), SortField::Popularity);
        assert_eq!(criteria.sort_direction(), SortDirection::Desc);
    }

    #[rstest]
    #[case(1)]
    #[case(20)]
    #[case(40)]
    fn accepts_limits_in_range(#[case] limit: i64) {
        let raw = RawSearchCriteria {
            limit: Some(limit),
            ..RawSearchCriteria::default()
        };
        let criteria = SearchCriteria::try_from(raw).expect("limit in range");
        assert_eq!(i64::from(criteria.limit()), limit);
    }

    #[rstest]
    #[case(0)]
    #[case(41)]
    #[case(-3)]
    fn rejects_limits_out_of_range(#[case] limit: i64) {
        let raw = RawSearchCriteria {
            limit: Some(limit),
            ..RawSearchCriteria::default()
        };
        assert_eq!(
            SearchCriteria::try_from(raw),
            Err(SearchCriteriaError::LimitOutOfRange)
        );
    }

    #[test]
    fn rejects_negative_skip() {
        let raw = RawSearchCriteria {
            skip: Some(-1),
            ..RawSearchCriteria::default()
        };
        let err = SearchCriteria::try_from(raw).expect_err("negative skip");
        assert_eq!(err.field(), "skip");
        assert_eq!(err.code(), "skip_negative");
    }

    #[rstest]
    #[case("popularity", SortField::Popularity)]
    #[case("releaseDate", SortField::ReleaseDate)]
    #[case("reviews", SortField::Reviews)]
    #[case("name", SortField::Name)]
    fn parses_sort_fields(#[case] raw: &str, #[case] expected: SortField) {
        assert_eq!(raw.parse::<SortField>(), Ok(expected));
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    #[case(Some("price".to_owned()), None, "sortField")]
    #[case(None, Some("up".to_owned()), "sortDirection")]
    fn rejects_unknown_sort_values(
        #[case] field: Option<String>,
        #[case] direction: Option<String>,
        #[case] expected_field: &str,
    ) {
        let raw = RawSearchCriteria {
            sort_field: field,
            sort_direction: direction,
            ..RawSearchCriteria::default()
        };
        let err = SearchCriteria::try_from(raw).expect_err("unknown sort value");
        assert_eq!(err.field(), expected_field);
    }

    #[rstest]
    #[case(Some(-1), None, SearchCriteriaError::PriceNegative)]
    #[case(Some(500), Some(100), SearchCriteriaError::PriceRangeInverted)]
    fn rejects_invalid_price_ranges(
        #[case] min: Option<i64>,
        #[case] max: Option<i64>,
        #[case] expected: SearchCriteriaError,
    ) {
        let raw = RawSearchCriteria {
            price_min: min,
            price_max: max,
            ..RawSearchCriteria::default()
        };
        assert_eq!(SearchCriteria::try_from(raw), Err(expected));
    }

    #[test]
    fn keeps_price_bounds_and_trims_text() {
        let raw = RawSearchCriteria {
            price_min: Some(100),
            price_max: Some(2000),
            search_text: Some("  forest ".to_owned()),
            ..RawSearchCriteria::default()
        };
        let criteria = SearchCriteria::try_from(raw).expect("valid criteria");
        let price = criteria.price().expect("price filter kept");
        assert!(price.contains(100));
        assert!(price.contains(2000));
        assert!(!price.contains(2001));
        assert_eq!(criteria.search_text(), Some("forest"));
    }

    #[test]
    fn blank_search_text_is_dropped() {
        let raw = RawSearchCriteria {
            search_text: Some("   ".to_owned()),
            ..RawSearchCriteria::default()
        };
        let criteria = SearchCriteria::try_from(raw).expect("valid criteria");
        assert!(criteria.search_text().is_none());
    }
}
