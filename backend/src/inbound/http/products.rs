//! Product API handlers.
//!
//! ```text
//! GET  /products/product/{id}
//! POST /products/search {"limit":20,"sortField":"releaseDate"}
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{
    Computed, EngineRange, Error, Product, RawSearchCriteria, Score, SearchCriteria,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_id};

const ID_FIELD: FieldName = FieldName::new("id");

/// Price in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PriceResponse {
    /// List price in cents.
    #[schema(example = 1999)]
    pub value: u64,
    /// Inline discount in cents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u64>,
}

/// Active discount in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DiscountResponse {
    /// Discount amount in cents.
    pub value: u64,
}

/// Descriptive texts of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DescriptionResponse {
    /// One-paragraph summary.
    pub short: String,
    /// Full description.
    pub long: String,
    /// Technical details.
    pub technical: String,
}

/// Picture URLs of a full product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PicturesResponse {
    /// Thumbnail URLs; the first is the primary image.
    pub thumbnail: Vec<String>,
    /// Screenshot URLs.
    pub screenshot: Vec<String>,
}

/// Picture URLs of a search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PartialPicturesResponse {
    /// Thumbnail URLs; the first is the primary image.
    pub thumbnail: Vec<String>,
}

/// Review score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    /// Popularity ranking score.
    pub value: f64,
    /// Number of ratings.
    pub total_ratings: u64,
    /// Mean rating in `0.0..=1.0`.
    pub mean_rating: f64,
}

/// Engine version range as version component arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct EngineRangeBody {
    /// Oldest version, e.g. `[4, 26]`; empty means open-ended.
    #[serde(default)]
    pub min: Vec<u32>,
    /// Newest version, e.g. `[5, 1]`; empty means open-ended.
    #[serde(default)]
    pub max: Vec<u32>,
}

/// Store-computed product fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComputedResponse {
    /// Review score, absent until the first rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreResponse>,
    /// Whether the product is promoted.
    pub is_boosted: bool,
    /// Supported engine versions.
    pub engine: EngineRangeBody,
}

/// Complete product returned by `GET /products/product/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FullProductResponse {
    /// Stable identifier.
    #[serde(rename = "_id")]
    #[schema(example = "6072d3a1c2b5f40015a1e0b2")]
    pub id: String,
    /// Display title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Owner user id.
    pub owner: String,
    /// Publication time.
    pub release_date: DateTime<Utc>,
    /// List price.
    pub price: PriceResponse,
    /// Active discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<DiscountResponse>,
    /// Descriptive texts.
    pub description: DescriptionResponse,
    /// Pictures, including screenshots.
    pub pictures: PicturesResponse,
    /// Store-computed fields.
    pub computed: ComputedResponse,
}

/// Search hit returned by `POST /products/search`.
///
/// Omits the description and screenshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialProductResponse {
    /// Stable identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Owner user id.
    pub owner: String,
    /// Publication time.
    pub release_date: DateTime<Utc>,
    /// List price.
    pub price: PriceResponse,
    /// Active discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<DiscountResponse>,
    /// Thumbnails only.
    pub pictures: PartialPicturesResponse,
    /// Store-computed fields.
    pub computed: ComputedResponse,
}

impl From<Score> for ScoreResponse {
    fn from(score: Score) -> Self {
        Self {
            value: score.value,
            total_ratings: score.total_ratings,
            mean_rating: score.mean_rating,
        }
    }
}

impl From<EngineRange> for EngineRangeBody {
    fn from(range: EngineRange) -> Self {
        Self {
            min: range.min,
            max: range.max,
        }
    }
}

impl From<EngineRangeBody> for EngineRange {
    fn from(body: EngineRangeBody) -> Self {
        Self {
            min: body.min,
            max: body.max,
        }
    }
}

impl From<Computed> for ComputedResponse {
    fn from(computed: Computed) -> Self {
        Self {
            score: computed.score.map(ScoreResponse::from),
            is_boosted: computed.is_boosted,
            engine: computed.engine.into(),
        }
    }
}

impl From<Product> for FullProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.into(),
            title: product.title,
            slug: product.slug,
            owner: product.owner.into(),
            release_date: product.release_date,
            price: PriceResponse {
                value: product.price.value,
                discount: product.price.discount,
            },
            discount: product
                .discount
                .map(|discount| DiscountResponse { value: discount.value }),
            description: DescriptionResponse {
                short: product.description.short,
                long: product.description.long,
                technical: product.description.technical,
            },
            pictures: PicturesResponse {
                thumbnail: product.pictures.thumbnail,
                screenshot: product.pictures.screenshot,
            },
            computed: product.computed.into(),
        }
    }
}

impl From<Product> for PartialProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.into(),
            title: product.title,
            slug: product.slug,
            owner: product.owner.into(),
            release_date: product.release_date,
            price: PriceResponse {
                value: product.price.value,
                discount: product.price.discount,
            },
            discount: product
                .discount
                .map(|discount| DiscountResponse { value: discount.value }),
            pictures: PartialPicturesResponse {
                thumbnail: product.pictures.thumbnail,
            },
            computed: product.computed.into(),
        }
    }
}

/// Price bounds in minor currency units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PriceRangeBody {
    /// Inclusive lower bound.
    pub min: Option<i64>,
    /// Inclusive upper bound.
    pub max: Option<i64>,
}

/// Request body for `POST /products/search`.
///
/// Example JSON:
/// `{"skip":0,"limit":20,"searchText":"forest","sortField":"releaseDate","sortDirection":"desc"}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchRequest {
    /// Results to skip; defaults to 0.
    #[schema(minimum = 0, default = 0)]
    pub skip: Option<i64>,
    /// Page size in `1..=40`; defaults to 40.
    #[schema(minimum = 1, maximum = 40, default = 40)]
    pub limit: Option<i64>,
    /// Case-insensitive text to match.
    pub search_text: Option<String>,
    /// `popularity` (default), `releaseDate`, `reviews` or `name`.
    #[schema(example = "popularity")]
    pub sort_field: Option<String>,
    /// `asc` or `desc` (default).
    #[schema(example = "desc")]
    pub sort_direction: Option<String>,
    /// Engine version range the product must overlap.
    pub engine: Option<EngineRangeBody>,
    /// Price bounds in cents.
    pub price: Option<PriceRangeBody>,
    /// Only discounted products when `true`.
    pub discounted: Option<bool>,
}

impl From<SearchRequest> for RawSearchCriteria {
    fn from(request: SearchRequest) -> Self {
        let price = request.price.unwrap_or_default();
        Self {
            skip: request.skip,
            limit: request.limit,
            search_text: request.search_text,
            sort_field: request.sort_field,
            sort_direction: request.sort_direction,
            engine: request.engine.map(EngineRange::from),
            price_min: price.min,
            price_max: price.max,
            discounted: request.discounted,
        }
    }
}

/// Fetch a product by id or slug.
#[utoipa::path(
    get,
    path = "/products/product/{id}",
    params(("id" = String, Path, description = "Product id or slug")),
    responses(
        (status = 200, description = "Full product", body = FullProductResponse),
        (status = 400, description = "Blank id", body = ErrorSchema),
        (status = 404, description = "Unknown product", body = ErrorSchema),
        (status = 503, description = "Product store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "getProductById"
)]
#[get("/product/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<FullProductResponse>> {
    let raw = path.into_inner();
    let id = require_id(&raw, ID_FIELD)?;
    let product = state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::not_found("product not found"))?;
    Ok(web::Json(product.into()))
}

/// Search products.
#[utoipa::path(
    post,
    path = "/products/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching products", body = [PartialProductResponse]),
        (status = 400, description = "Invalid search", body = ErrorSchema),
        (status = 503, description = "Product store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "searchProducts"
)]
#[post("/search")]
pub async fn search_products(
    state: web::Data<HttpState>,
    payload: web::Json<SearchRequest>,
) -> ApiResult<web::Json<Vec<PartialProductResponse>>> {
    let criteria = SearchCriteria::try_from(RawSearchCriteria::from(payload.into_inner()))?;
    let products = state.products.search(&criteria).await?;
    debug!(
        hits = products.len(),
        skip = criteria.skip(),
        limit = criteria.limit(),
        "product search served"
    );
    Ok(web::Json(
        products.into_iter().map(PartialProductResponse::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::page::{PageComposer, PageTemplate, SiteMetadata};
    use crate::domain::ports::{MockProductService, MockUserService, ProductServiceError};
    use crate::domain::product::fixtures::product;
    use crate::domain::{SortDirection, SortField};
    use crate::inbound::http::validation::json_config;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn state(products: MockProductService) -> web::Data<HttpState> {
        let products = Arc::new(products);
        let pages = PageComposer::new(
            Arc::new(PageTemplate::new("")),
            SiteMetadata::default(),
            products.clone(),
            Arc::new(MockUserService::new()),
        );
        web::Data::new(HttpState::new(products, Arc::new(pages)))
    }

    fn test_app(
        products: MockProductService,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(state(products)).app_data(json_config()).service(
            web::scope("/products")
                .service(get_product)
                .service(search_products),
        )
    }

    async fn json_body(response: actix_web::dev::ServiceResponse) -> Value {
        let body = actix_test::read_body(response).await;
        serde_json::from_slice(&body).expect("json body")
    }

    #[actix_web::test]
    async fn get_product_returns_full_product() {
        let mut products = MockProductService::new();
        products
            .expect_find_by_id()
            .withf(|id| id == "stylized-forest-pack")
            .return_once(|_| Ok(Some(product())));
        let app = actix_test::init_service(test_app(products)).await;

        let request = actix_test::TestRequest::get()
            .uri("/products/product/stylized-forest-pack")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let value = json_body(response).await;
        assert_eq!(value["_id"], "6072d3a1");
        assert_eq!(value["description"]["short"], "Trees, rocks & grass");
        assert_eq!(
            value["pictures"]["screenshot"],
            json!(["https://cdn.example.test/forest-1.png"])
        );
        assert_eq!(value["releaseDate"], "2021-04-11T08:30:00Z");
    }

    #[actix_web::test]
    async fn get_product_reports_unknown_ids() {
        let mut products = MockProductService::new();
        products.expect_find_by_id().return_once(|_| Ok(None));
        let app = actix_test::init_service(test_app(products)).await;

        let request = actix_test::TestRequest::get()
            .uri("/products/product/missing")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["code"], "not_found");
    }

    #[actix_web::test]
    async fn get_product_rejects_blank_ids() {
        let mut products = MockProductService::new();
        products.expect_find_by_id().never();
        let app = actix_test::init_service(test_app(products)).await;

        let request = actix_test::TestRequest::get()
            .uri("/products/product/%20%20")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["details"],
            json!({"field": "id", "code": "empty_id"})
        );
    }

    #[rstest]
    #[case(ProductServiceError::connection("refused"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(ProductServiceError::query("corrupt"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[actix_web::test]
    async fn get_product_maps_port_failures(
        #[case] failure: ProductServiceError,
        #[case] expected: StatusCode,
    ) {
        let mut products = MockProductService::new();
        products
            .expect_find_by_id()
            .return_once(move |_| Err(failure));
        let app = actix_test::init_service(test_app(products)).await;

        let request = actix_test::TestRequest::get()
            .uri("/products/product/abc")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), expected);
    }

    #[actix_web::test]
    async fn search_returns_partial_products() {
        let mut products = MockProductService::new();
        products
            .expect_search()
            .withf(|criteria: &SearchCriteria| {
                criteria.limit() == 20
                    && criteria.sort_field() == SortField::ReleaseDate
                    && criteria.sort_direction() == SortDirection::Desc
                    && criteria.search_text() == Some("forest")
            })
            .return_once(|_| Ok(vec![product()]));
        let app = actix_test::init_service(test_app(products)).await;

        let request = actix_test::TestRequest::post()
            .uri("/products/search")
            .set_json(json!({"limit": 20, "sortField": "releaseDate", "searchText": "forest"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let value = json_body(response).await;
        let hits = value.as_array().expect("array");
        assert_eq!(hits.len(), 1);
        assert!(hits[0].get("description").is_none());
        assert!(hits[0]["pictures"].get("screenshot").is_none());
        serde_json::from_value::<PartialProductResponse>(hits[0].clone())
            .expect("partial product shape");
    }

    #[rstest]
    #[case(json!({"limit": 41}), "limit", "limit_out_of_range")]
    #[case(json!({"skip": -1}), "skip", "skip_negative")]
    #[case(json!({"sortField": "price"}), "sortField", "unknown_sort_field")]
    #[case(json!({"price": {"min": 10, "max": 5}}), "price", "price_range_inverted")]
    #[actix_web::test]
    async fn search_rejects_out_of_bounds_criteria(
        #[case] body: Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mut products = MockProductService::new();
        products.expect_search().never();
        let app = actix_test::init_service(test_app(products)).await;

        let request = actix_test::TestRequest::post()
            .uri("/products/search")
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value = json_body(response).await;
        assert_eq!(value["code"], "invalid_request");
        assert_eq!(value["details"], json!({"field": field, "code": code}));
    }

    #[rstest]
    #[case(json!({"unexpected": true}))]
    #[case(json!({"limit": "ten"}))]
    #[actix_web::test]
    async fn search_rejects_malformed_bodies(#[case] body: Value) {
        let mut products = MockProductService::new();
        products.expect_search().never();
        let app = actix_test::init_service(test_app(products)).await;

        let request = actix_test::TestRequest::post()
            .uri("/products/search")
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["details"]["code"], "invalid_body");
    }

    #[test]
    fn search_request_defaults_to_empty_criteria() {
        let raw = RawSearchCriteria::from(SearchRequest::default());
        assert_eq!(raw, RawSearchCriteria::default());
    }
}
