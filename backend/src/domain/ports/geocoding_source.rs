//! Driven port for resolving a pincode to a geographic coordinate.
//!
//! The domain owns the contract so the coordinator stays adapter-agnostic:
//! `Ok(None)` is the determinate "no match" outcome (unknown pincode or a
//! provider refusal), while transport-level faults surface as errors and are
//! treated as transient by the caller.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{GeoCoordinate, Pincode};

define_port_error! {
    /// Errors surfaced while calling the geocoding provider.
    pub enum GeocodingSourceError {
        /// Network transport failed before a response arrived.
        Transport => "geocoding transport failed: {message}",
        /// The call exceeded its deadline.
        Timeout => "geocoding timeout: {message}",
        /// The provider response could not be decoded.
        Decode => "geocoding response decode failed: {message}",
    }
}

/// Port for resolving pincodes against an external geocoding provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeocodingSource: Send + Sync {
    /// Resolve the single best match for `pincode`.
    async fn geocode(
        &self,
        pincode: &Pincode,
    ) -> Result<Option<GeoCoordinate>, GeocodingSourceError>;
}

/// Fixture implementation resolving every pincode to one fixed coordinate.
#[derive(Debug, Clone, Copy)]
pub struct FixtureGeocodingSource(pub GeoCoordinate);

#[async_trait]
impl GeocodingSource for FixtureGeocodingSource {
    async fn geocode(
        &self,
        _pincode: &Pincode,
    ) -> Result<Option<GeoCoordinate>, GeocodingSourceError> {
        Ok(Some(self.0))
    }
}
