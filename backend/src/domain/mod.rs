//! Domain primitives, aggregates and services.
//!
//! Purpose: define the marketplace entities shared by the HTTP API, the SSR
//! layer and the typed client, plus the ports through which products and
//! owners are read. Nothing here knows about actix or reqwest.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifiers.
//! - Product / User: read-only marketplace entities.
//! - SearchCriteria: validated search input for the product port.
//! - page: SSR page composition.

pub mod error;
pub mod page;
pub mod ports;
pub mod product;
pub mod search;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::product::{
    Computed, Description, Discount, EngineRange, Pictures, Price, Product, ProductId,
    ProductValidationError, Score,
};
pub use self::search::{
    DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT, PriceRange, RawSearchCriteria, SearchCriteria,
    SearchCriteriaError, SortDirection, SortField,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Networks, UNKNOWN_AUTHOR, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use orbital_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
