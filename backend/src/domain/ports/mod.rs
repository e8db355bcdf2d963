//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_admin;
mod geocoding_source;
mod quote_query;
mod quote_store;
mod routing_source;
mod settings_source;
mod zone_repository;
mod zones_query;

#[cfg(test)]
pub use cache_admin::MockDeliveryCacheAdmin;
pub use cache_admin::{DeliveryCacheAdmin, FixtureDeliveryCacheAdmin};
#[cfg(test)]
pub use geocoding_source::MockGeocodingSource;
pub use geocoding_source::{FixtureGeocodingSource, GeocodingSource, GeocodingSourceError};
#[cfg(test)]
pub use quote_query::MockDeliveryQuoteQuery;
pub use quote_query::{DeliveryQuoteQuery, FixtureDeliveryQuoteQuery};
#[cfg(test)]
pub use quote_store::MockQuoteStoreBackend;
pub use quote_store::{FixtureQuoteStore, QuoteStoreBackend, QuoteStoreError};
#[cfg(test)]
pub use routing_source::MockRoutingSource;
pub use routing_source::{DriveRoute, FixtureRoutingSource, RoutingSource, RoutingSourceError};
#[cfg(test)]
pub use settings_source::MockSettingsSource;
pub use settings_source::{FixedRateSettings, FixtureSettingsSource, SettingsSource, SettingsSourceError};
#[cfg(test)]
pub use zone_repository::MockZoneRepository;
pub use zone_repository::{FixtureZoneRepository, ZoneRepository, ZoneRepositoryError};
#[cfg(test)]
pub use zones_query::MockZonesQuery;
pub use zones_query::{FixtureZonesQuery, ZonesQuery};
