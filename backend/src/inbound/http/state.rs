//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend on
//! driving ports only and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DeliveryCacheAdmin, DeliveryQuoteQuery, FixtureDeliveryCacheAdmin, FixtureDeliveryQuoteQuery,
    FixtureZonesQuery, ZonesQuery,
};
use crate::domain::{DeliveryQuote, GeoCoordinate};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Quote use-case surface.
    pub quotes: Arc<dyn DeliveryQuoteQuery>,
    /// Cache maintenance surface.
    pub cache_admin: Arc<dyn DeliveryCacheAdmin>,
    /// Zone catalogue read surface.
    pub zones: Arc<dyn ZonesQuery>,
}

impl HttpState {
    /// Bundle the supplied port implementations.
    pub fn new(
        quotes: Arc<dyn DeliveryQuoteQuery>,
        cache_admin: Arc<dyn DeliveryCacheAdmin>,
        zones: Arc<dyn ZonesQuery>,
    ) -> Self {
        Self {
            quotes,
            cache_admin,
            zones,
        }
    }

    /// State backed entirely by fixtures, for handler tests and local spikes.
    pub fn fixtures() -> Self {
        let canned = DeliveryQuote {
            distance_km: 12.3,
            delivery_charge: 123,
            duration_minutes: Some(25),
            delivery_unavailable: false,
            error: None,
            coordinates: Some(GeoCoordinate {
                lat: 21.1458,
                lng: 79.0882,
            }),
            rate_per_km: Some(10.0),
        };
        Self::new(
            Arc::new(FixtureDeliveryQuoteQuery(canned)),
            Arc::new(FixtureDeliveryCacheAdmin),
            Arc::new(FixtureZonesQuery),
        )
    }
}
