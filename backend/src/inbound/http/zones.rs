//! Delivery zone HTTP handlers.
//!
//! ```text
//! GET  /api/v1/delivery/zones
//! POST /api/v1/admin/delivery/zones/refresh
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::DeliveryZone;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Response payload for one delivery zone band.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZoneResponse {
    /// Display name for the band.
    pub zone_name: String,
    /// Inclusive lower distance bound in kilometres.
    pub min_distance_km: f64,
    /// Exclusive upper distance bound in kilometres.
    pub max_distance_km: f64,
    /// Flat display charge for the band.
    pub delivery_charge: u32,
    /// Whether the band is currently shown.
    pub is_active: bool,
}

impl From<DeliveryZone> for ZoneResponse {
    fn from(value: DeliveryZone) -> Self {
        Self {
            zone_name: value.zone_name,
            min_distance_km: value.min_distance_km,
            max_distance_km: value.max_distance_km,
            delivery_charge: value.delivery_charge,
            is_active: value.is_active,
        }
    }
}

fn to_response(zones: Vec<DeliveryZone>) -> Vec<ZoneResponse> {
    zones.into_iter().map(ZoneResponse::from).collect()
}

/// List the delivery zone bands.
#[utoipa::path(
    get,
    path = "/api/v1/delivery/zones",
    description = "Zone bands shown to shoppers; display data only, the live \
                   charge uses the per-kilometre rate.",
    responses(
        (status = 200, description = "Zone bands ordered by distance", body = [ZoneResponse]),
        (status = 503, description = "Zone store unavailable",
         body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["delivery"],
    operation_id = "listDeliveryZones"
)]
#[get("/delivery/zones")]
pub async fn get_zones(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let zones = state.zones.zones().await?;
    Ok(HttpResponse::Ok().json(to_response(zones)))
}

/// Refetch the zone table from its store.
#[utoipa::path(
    post,
    path = "/api/v1/admin/delivery/zones/refresh",
    description = "Reload zone bands after an operator edit.",
    responses(
        (status = 200, description = "Refreshed zone bands", body = [ZoneResponse]),
        (status = 503, description = "Zone store unavailable",
         body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "refreshDeliveryZones"
)]
#[post("/admin/delivery/zones/refresh")]
pub async fn refresh_zones(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let zones = state.zones.refresh().await?;
    Ok(HttpResponse::Ok().json(to_response(zones)))
}

#[cfg(test)]
mod tests {
    //! Handler envelope coverage over fixture state.
    use super::{get_zones, refresh_zones};
    use crate::inbound::http::state::HttpState;
    use actix_web::{App, test, web};

    fn fixture_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(HttpState::fixtures()))
            .service(web::scope("/api/v1").service(get_zones).service(refresh_zones))
    }

    #[actix_web::test]
    async fn zones_list_answers_200_with_bands() {
        let app = test::init_service(fixture_app()).await;
        let request = test::TestRequest::get()
            .uri("/api/v1/delivery/zones")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        let bands = body.as_array().expect("array payload");
        assert!(!bands.is_empty());
        assert!(bands[0]["zoneName"].is_string());
    }

    #[actix_web::test]
    async fn refresh_answers_200() {
        let app = test::init_service(fixture_app()).await;
        let request = test::TestRequest::post()
            .uri("/api/v1/admin/delivery/zones/refresh")
            .to_request();
        let response = test::call_service(&app, request).await;
        assert!(response.status().is_success());
    }
}
