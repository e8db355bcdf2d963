//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: the
//! delivery quote endpoint, zone listing and refresh, cache maintenance, and
//! the health probes. Swagger UI serves the document in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::quotes::{CoordinateResponse, QuoteResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::zones::ZoneResponse;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sabziwala delivery pricing API",
        description = "Pincode to delivery-charge resolution with zone \
                       reference data and cache maintenance."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::quotes::get_delivery_quote,
        crate::inbound::http::zones::get_zones,
        crate::inbound::http::zones::refresh_zones,
        crate::inbound::http::admin::clear_delivery_cache,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        QuoteResponse,
        CoordinateResponse,
        ZoneResponse,
        ErrorSchema,
        ErrorCodeSchema,
    ))
)]
pub struct ApiDoc;
