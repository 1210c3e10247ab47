//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the product API and health probe paths together with
//! the error schema wrappers from `inbound::http::schemas`. The document is
//! served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use crate::inbound::http::products::{
    ComputedResponse, DescriptionResponse, DiscountResponse, EngineRangeBody,
    FullProductResponse, PartialPicturesResponse, PartialProductResponse, PicturesResponse,
    PriceRangeBody, PriceResponse, ScoreResponse, SearchRequest,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Orbital Market backend API",
        description = "Product lookup and search for the Orbital Market storefront, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::search_products,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        FullProductResponse,
        PartialProductResponse,
        SearchRequest,
        PriceResponse,
        PriceRangeBody,
        DiscountResponse,
        DescriptionResponse,
        PicturesResponse,
        PartialPicturesResponse,
        ScoreResponse,
        ComputedResponse,
        EngineRangeBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "products", description = "Product lookup and search"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
