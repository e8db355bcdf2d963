//! Delivery quote HTTP handlers.
//!
//! ```text
//! GET /api/v1/delivery/quote/{pincode}
//! ```
//!
//! Quotes always answer `200`: unavailability (malformed pincode, unknown
//! address, beyond range, resolver fault) is data on the payload, not an
//! HTTP error, so storefront clients render it without special casing.

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{DeliveryQuote, GeoCoordinate};
use crate::inbound::http::state::HttpState;

/// Destination coordinate payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoordinateResponse {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl From<GeoCoordinate> for CoordinateResponse {
    fn from(value: GeoCoordinate) -> Self {
        Self {
            lat: value.lat,
            lng: value.lng,
        }
    }
}

/// Response payload for a delivery quote.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    /// Driving distance in kilometres, rounded to one decimal place.
    pub distance_km: f64,
    /// Delivery charge in whole currency units.
    pub delivery_charge: u32,
    /// Driving duration in whole minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Whether delivery is unavailable for this pincode.
    pub delivery_unavailable: bool,
    /// Human-readable reason when unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Destination coordinate on successful resolutions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<CoordinateResponse>,
    /// Rate applied at calculation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_per_km: Option<f64>,
}

impl From<DeliveryQuote> for QuoteResponse {
    fn from(value: DeliveryQuote) -> Self {
        Self {
            distance_km: value.distance_km,
            delivery_charge: value.delivery_charge,
            duration_minutes: value.duration_minutes,
            delivery_unavailable: value.delivery_unavailable,
            error: value.error,
            coordinates: value.coordinates.map(CoordinateResponse::from),
            rate_per_km: value.rate_per_km,
        }
    }
}

/// Quote a delivery charge for one pincode.
#[utoipa::path(
    get,
    path = "/api/v1/delivery/quote/{pincode}",
    description = "Resolve a pincode to a delivery distance and charge. \
                   Unavailability is reported on the payload, never as an HTTP error.",
    params(
        ("pincode" = String, Path, description = "Destination pincode (six digits)")
    ),
    responses(
        (status = 200, description = "Quote outcome", body = QuoteResponse)
    ),
    tags = ["delivery"],
    operation_id = "getDeliveryQuote"
)]
#[get("/delivery/quote/{pincode}")]
pub async fn get_delivery_quote(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> HttpResponse {
    let quote = state.quotes.quote(path.as_str()).await;
    HttpResponse::Ok()
        .insert_header(("Cache-Control", "private, max-age=60"))
        .json(QuoteResponse::from(quote))
}
