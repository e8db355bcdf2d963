//! Driven port for computing a driving route between two coordinates.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::GeoCoordinate;

/// A resolved driving route from the store to a destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveRoute {
    /// Raw driving distance in kilometres (not yet rounded for pricing).
    pub distance_km: f64,
    /// Raw driving duration in minutes.
    pub duration_minutes: f64,
}

define_port_error! {
    /// Errors surfaced while calling the routing provider.
    pub enum RoutingSourceError {
        /// Network transport failed before a response arrived.
        Transport => "routing transport failed: {message}",
        /// The call exceeded its deadline.
        Timeout => "routing timeout: {message}",
        /// The provider response could not be decoded.
        Decode => "routing response decode failed: {message}",
        /// The adapter rejected the request before execution.
        InvalidRequest => "routing request invalid: {message}",
    }
}

/// Port for querying an external routing provider.
///
/// `Ok(None)` is the determinate "no route" outcome (the provider answered
/// but found no drivable path); errors are transient faults.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoutingSource: Send + Sync {
    /// Compute a driving route from `origin` to `destination`.
    async fn drive_route(
        &self,
        origin: GeoCoordinate,
        destination: GeoCoordinate,
    ) -> Result<Option<DriveRoute>, RoutingSourceError>;
}

/// Fixture implementation returning one fixed route for every request.
#[derive(Debug, Clone, Copy)]
pub struct FixtureRoutingSource(pub DriveRoute);

#[async_trait]
impl RoutingSource for FixtureRoutingSource {
    async fn drive_route(
        &self,
        _origin: GeoCoordinate,
        _destination: GeoCoordinate,
    ) -> Result<Option<DriveRoute>, RoutingSourceError> {
        Ok(Some(self.0))
    }
}
