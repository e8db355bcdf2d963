//! REST surface behaviour over a real pricing service wired with fixtures.

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use mockable::DefaultClock;

use backend::Trace;
use backend::domain::ports::{
    DeliveryCacheAdmin, DeliveryQuoteQuery, DriveRoute, FixtureGeocodingSource,
    FixtureRoutingSource, FixtureSettingsSource, FixtureZoneRepository, ZonesQuery,
};
use backend::domain::{
    DeliveryPricingService, GeoCoordinate, INVALID_PINCODE_MESSAGE, MemoryQuoteStore,
    PricingRules, ZoneCatalogue,
};
use backend::inbound::http::admin::clear_delivery_cache;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::quotes::get_delivery_quote;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::zones::{get_zones, refresh_zones};

fn pricing_state() -> HttpState {
    let service = Arc::new(DeliveryPricingService::new(
        Arc::new(FixtureGeocodingSource(GeoCoordinate {
            lat: 21.2,
            lng: 79.1,
        })),
        Arc::new(FixtureRoutingSource(DriveRoute {
            distance_km: 12.3,
            duration_minutes: 24.6,
        })),
        Arc::new(FixtureSettingsSource),
        Arc::new(MemoryQuoteStore::default()),
        Arc::new(DefaultClock),
        PricingRules::default(),
    ));
    let quotes: Arc<dyn DeliveryQuoteQuery> = service.clone();
    let cache_admin: Arc<dyn DeliveryCacheAdmin> = service;
    let zones: Arc<dyn ZonesQuery> = Arc::new(ZoneCatalogue::new(Arc::new(FixtureZoneRepository)));
    HttpState::new(quotes, cache_admin, zones)
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .wrap(Trace)
                .service(
                    web::scope("/api/v1")
                        .service(get_delivery_quote)
                        .service(get_zones)
                        .service(refresh_zones)
                        .service(clear_delivery_cache),
                ),
        )
        .await
    };
}

#[actix_web::test]
async fn a_valid_pincode_gets_a_priced_quote() {
    let app = app!(pricing_state());
    let request = test::TestRequest::get()
        .uri("/api/v1/delivery/quote/440001")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["deliveryUnavailable"], false);
    assert_eq!(body["deliveryCharge"], 123);
    assert_eq!(body["distanceKm"], 12.3);
    assert_eq!(body["durationMinutes"], 25);
    assert_eq!(body["ratePerKm"], 10.0);
}

#[actix_web::test]
async fn a_malformed_pincode_still_answers_200_with_unavailability_data() {
    let app = app!(pricing_state());
    let request = test::TestRequest::get()
        .uri("/api/v1/delivery/quote/44001x")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["deliveryUnavailable"], true);
    assert_eq!(body["error"], INVALID_PINCODE_MESSAGE);
    assert_eq!(body["deliveryCharge"], 0);
}

#[actix_web::test]
async fn responses_carry_trace_ids() {
    let app = app!(pricing_state());
    let request = test::TestRequest::get()
        .uri("/api/v1/delivery/quote/440001")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert!(response.headers().contains_key("trace-id"));
}

#[actix_web::test]
async fn zones_are_listed_in_ascending_distance_order() {
    let app = app!(pricing_state());
    let request = test::TestRequest::get()
        .uri("/api/v1/delivery/zones")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    let bands = body.as_array().expect("array payload");
    let minimums: Vec<f64> = bands
        .iter()
        .map(|band| band["minDistanceKm"].as_f64().expect("numeric bound"))
        .collect();
    let mut sorted = minimums.clone();
    sorted.sort_by(f64::total_cmp);
    assert_eq!(minimums, sorted);
}

#[actix_web::test]
async fn zone_refresh_answers_200_with_bands() {
    let app = app!(pricing_state());
    let request = test::TestRequest::post()
        .uri("/api/v1/admin/delivery/zones/refresh")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn cache_clear_answers_204_and_400_for_bad_parameters() {
    let app = app!(pricing_state());

    let ok = test::TestRequest::delete()
        .uri("/api/v1/admin/delivery/cache?pincode=440001")
        .to_request();
    let response = test::call_service(&app, ok).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let bad = test::TestRequest::delete()
        .uri("/api/v1/admin/delivery/cache?pincode=four-four")
        .to_request();
    let response = test::call_service(&app, bad).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn health_probes_reflect_lifecycle_state() {
    let state = web::Data::new(HealthState::new());
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .service(ready)
            .service(live),
    )
    .await;

    let not_ready = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(not_ready.status(), StatusCode::SERVICE_UNAVAILABLE);

    state.mark_ready();
    let ready_now = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(ready_now.status(), StatusCode::OK);

    let alive = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/live").to_request(),
    )
    .await;
    assert_eq!(alive.status(), StatusCode::OK);
}
