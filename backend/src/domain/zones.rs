//! Delivery zone reference data and its read-through catalogue.
//!
//! Zones are display-only bands shown to shoppers and the admin console; the
//! live pricing path uses the linear rate-per-km model exclusively. The
//! catalogue fetches once on first use and refetches only on demand; zone
//! reads never sit on the quote hot path.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{ZoneRepository, ZoneRepositoryError, ZonesQuery};
use crate::domain::Error;

/// One distance band in the delivery zone table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryZone {
    /// Display name for the band.
    pub zone_name: String,
    /// Inclusive lower distance bound in kilometres.
    pub min_distance_km: f64,
    /// Exclusive upper distance bound in kilometres.
    pub max_distance_km: f64,
    /// Flat charge displayed for the band, in whole currency units.
    pub delivery_charge: u32,
    /// Whether the band is currently shown.
    pub is_active: bool,
}

/// Read-through cache over a [`ZoneRepository`].
pub struct ZoneCatalogue {
    repository: Arc<dyn ZoneRepository>,
    zones: RwLock<Option<Vec<DeliveryZone>>>,
}

impl ZoneCatalogue {
    /// Build a catalogue over `repository`; nothing is fetched yet.
    pub fn new(repository: Arc<dyn ZoneRepository>) -> Self {
        Self {
            repository,
            zones: RwLock::new(None),
        }
    }

    fn cached(&self) -> Option<Vec<DeliveryZone>> {
        self.zones
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, zones: Vec<DeliveryZone>) {
        *self.zones.write().unwrap_or_else(PoisonError::into_inner) = Some(zones);
    }

    async fn fetch_sorted(&self) -> Result<Vec<DeliveryZone>, Error> {
        let mut zones = self
            .repository
            .fetch_zones()
            .await
            .map_err(map_zone_error)?;
        zones.sort_by(|a, b| a.min_distance_km.total_cmp(&b.min_distance_km));
        Ok(zones)
    }
}

fn map_zone_error(error: ZoneRepositoryError) -> Error {
    match error {
        ZoneRepositoryError::Backend { message } => {
            Error::service_unavailable(format!("zone repository unavailable: {message}"))
        }
        ZoneRepositoryError::Decode { message } => {
            Error::internal(format!("zone data decode failed: {message}"))
        }
    }
}

#[async_trait]
impl ZonesQuery for ZoneCatalogue {
    async fn zones(&self) -> Result<Vec<DeliveryZone>, Error> {
        if let Some(zones) = self.cached() {
            return Ok(zones);
        }
        let zones = self.fetch_sorted().await?;
        self.store(zones.clone());
        Ok(zones)
    }

    async fn refresh(&self) -> Result<Vec<DeliveryZone>, Error> {
        let zones = self.fetch_sorted().await?;
        self.store(zones.clone());
        Ok(zones)
    }
}

#[cfg(test)]
mod tests {
    //! Catalogue fetch-once and refresh behaviour.
    use super::{DeliveryZone, ZoneCatalogue};
    use crate::domain::ports::{MockZoneRepository, ZoneRepositoryError, ZonesQuery};
    use crate::domain::ErrorCode;
    use std::sync::Arc;

    fn zone(name: &str, min: f64) -> DeliveryZone {
        DeliveryZone {
            zone_name: name.to_owned(),
            min_distance_km: min,
            max_distance_km: min + 10.0,
            delivery_charge: 50,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn zones_fetch_once_and_sort_ascending() {
        let mut repository = MockZoneRepository::new();
        repository
            .expect_fetch_zones()
            .times(1)
            .return_once(|| Ok(vec![zone("Far", 25.0), zone("Near", 0.0)]));

        let catalogue = ZoneCatalogue::new(Arc::new(repository));
        let first = catalogue.zones().await.expect("zones");
        assert_eq!(first.first().map(|z| z.zone_name.as_str()), Some("Near"));

        // Second read must come from the cached copy.
        let second = catalogue.zones().await.expect("zones");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn refresh_refetches_and_replaces_cached_copy() {
        let mut repository = MockZoneRepository::new();
        repository
            .expect_fetch_zones()
            .times(1)
            .return_once(|| Ok(vec![zone("Old", 0.0)]));
        repository
            .expect_fetch_zones()
            .times(1)
            .return_once(|| Ok(vec![zone("New", 0.0)]));

        let catalogue = ZoneCatalogue::new(Arc::new(repository));
        let initial = catalogue.zones().await.expect("zones");
        assert_eq!(initial.first().map(|z| z.zone_name.as_str()), Some("Old"));

        let refreshed = catalogue.refresh().await.expect("refresh");
        assert_eq!(refreshed.first().map(|z| z.zone_name.as_str()), Some("New"));

        let cached = catalogue.zones().await.expect("zones");
        assert_eq!(cached, refreshed);
    }

    #[tokio::test]
    async fn backend_failures_map_to_service_unavailable() {
        let mut repository = MockZoneRepository::new();
        repository
            .expect_fetch_zones()
            .times(1)
            .return_once(|| Err(ZoneRepositoryError::backend("store offline")));

        let catalogue = ZoneCatalogue::new(Arc::new(repository));
        let error = catalogue.zones().await.expect_err("propagated");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
