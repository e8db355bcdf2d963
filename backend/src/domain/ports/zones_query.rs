//! Driving port for reading delivery zone reference data.

use async_trait::async_trait;

use crate::domain::{DeliveryZone, Error};

/// Read surface for the zone catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ZonesQuery: Send + Sync {
    /// Return the zone list, fetching it on first use.
    ///
    /// # Errors
    /// Returns an error when the zone store cannot be read.
    async fn zones(&self) -> Result<Vec<DeliveryZone>, Error>;

    /// Refetch the zone list from its store and replace the cached copy.
    ///
    /// # Errors
    /// Returns an error when the zone store cannot be read.
    async fn refresh(&self) -> Result<Vec<DeliveryZone>, Error>;
}

/// Fixture query exposing the built-in fixture zone ladder.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureZonesQuery;

#[async_trait]
impl ZonesQuery for FixtureZonesQuery {
    async fn zones(&self) -> Result<Vec<DeliveryZone>, Error> {
        use crate::domain::ports::{FixtureZoneRepository, ZoneRepository};
        FixtureZoneRepository
            .fetch_zones()
            .await
            .map_err(|error| Error::service_unavailable(error.to_string()))
    }

    async fn refresh(&self) -> Result<Vec<DeliveryZone>, Error> {
        self.zones().await
    }
}
