//! Driven port for fetching delivery zone reference data.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::DeliveryZone;

define_port_error! {
    /// Errors surfaced while fetching zone data.
    pub enum ZoneRepositoryError {
        /// The zone store is unavailable or rejected the read.
        Backend => "zone repository failure: {message}",
        /// Stored zone data could not be decoded.
        Decode => "zone data decode failed: {message}",
    }
}

/// Port for reading the delivery zone table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ZoneRepository: Send + Sync {
    /// Fetch every configured zone, in storage order.
    async fn fetch_zones(&self) -> Result<Vec<DeliveryZone>, ZoneRepositoryError>;
}

/// Fixture repository with a small built-in zone ladder.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureZoneRepository;

#[async_trait]
impl ZoneRepository for FixtureZoneRepository {
    async fn fetch_zones(&self) -> Result<Vec<DeliveryZone>, ZoneRepositoryError> {
        Ok(vec![
            DeliveryZone {
                zone_name: "City".to_owned(),
                min_distance_km: 0.0,
                max_distance_km: 10.0,
                delivery_charge: 40,
                is_active: true,
            },
            DeliveryZone {
                zone_name: "Suburbs".to_owned(),
                min_distance_km: 10.0,
                max_distance_km: 25.0,
                delivery_charge: 120,
                is_active: true,
            },
            DeliveryZone {
                zone_name: "Outskirts".to_owned(),
                min_distance_km: 25.0,
                max_distance_km: 50.0,
                delivery_charge: 300,
                is_active: true,
            },
        ])
    }
}
