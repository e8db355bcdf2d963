//! Server bootstrap: configuration, adapter construction, route wiring.

mod config;

pub use config::DeliverySettings;

use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use reqwest::Url;
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ports::{
    DeliveryCacheAdmin, DeliveryQuoteQuery, FixedRateSettings, FixtureSettingsSource,
    FixtureZoneRepository, SettingsSource, ZoneRepository, ZonesQuery,
};
use backend::domain::{DeliveryPricingService, PricingRules, ZoneCatalogue};
use backend::inbound::http::admin::clear_delivery_cache;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::quotes::get_delivery_quote;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::zones::{get_zones, refresh_zones};
use backend::outbound::{FileQuoteStore, FileZoneRepository, NominatimGeocoder, OsrmRouter};

/// Load configuration, wire adapters, and run the HTTP server to completion.
///
/// # Errors
/// Returns an error when configuration, adapter construction, or the
/// listener bind fails.
pub async fn run() -> color_eyre::Result<()> {
    let settings = DeliverySettings::load()?;
    let timeout = Duration::from_secs(settings.outbound_timeout_seconds());

    let geocoder = Arc::new(NominatimGeocoder::new(
        Url::parse(settings.geocoding_endpoint())?,
        timeout,
    )?);
    let router = Arc::new(OsrmRouter::new(
        Url::parse(settings.routing_endpoint())?,
        timeout,
    )?);
    let rate_source: Arc<dyn SettingsSource> = match settings.rate_per_km {
        Some(rate) => Arc::new(FixedRateSettings::new(rate)),
        None => Arc::new(FixtureSettingsSource),
    };
    let durable = FileQuoteStore::open(settings.cache_dir())?;

    let pricing = Arc::new(DeliveryPricingService::new(
        geocoder,
        router,
        rate_source,
        durable,
        Arc::new(DefaultClock),
        PricingRules::default(),
    ));

    let zone_repository: Arc<dyn ZoneRepository> = match settings.zones_file() {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "zones.json".to_owned());
            Arc::new(FileZoneRepository::open(dir, name)?)
        }
        None => Arc::new(FixtureZoneRepository),
    };
    let zones = Arc::new(ZoneCatalogue::new(zone_repository));

    let quotes: Arc<dyn DeliveryQuoteQuery> = pricing.clone();
    let cache_admin: Arc<dyn DeliveryCacheAdmin> = pricing;
    let zone_reads: Arc<dyn ZonesQuery> = zones;
    let http_state = web::Data::new(HttpState::new(quotes, cache_admin, zone_reads));
    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();

    let bind = (settings.bind_addr().to_owned(), settings.port());
    info!(addr = %bind.0, port = bind.1, "starting delivery pricing server");

    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .service(get_delivery_quote)
            .service(get_zones)
            .service(refresh_zones)
            .service(clear_delivery_cache);

        let app = App::new()
            .app_data(http_state.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .service(api)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind)?;

    health_state.mark_ready();
    server.run().await?;
    Ok(())
}
