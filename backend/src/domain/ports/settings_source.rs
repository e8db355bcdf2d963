//! Driven port for the server-authoritative pricing settings.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while reading pricing settings.
    pub enum SettingsSourceError {
        /// The settings backend is unavailable.
        Backend => "settings source failure: {message}",
    }
}

/// Port exposing the authoritative rate-per-km.
///
/// Consulted on live resolutions only; the coordinator falls back to its last
/// known rate when the source has no value or fails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsSource: Send + Sync {
    /// Fetch the current rate in currency units per kilometre, if configured.
    async fn fetch_rate_per_km(&self) -> Result<Option<f64>, SettingsSourceError>;
}

/// Fixture source with no configured rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSettingsSource;

#[async_trait]
impl SettingsSource for FixtureSettingsSource {
    async fn fetch_rate_per_km(&self) -> Result<Option<f64>, SettingsSourceError> {
        Ok(None)
    }
}

/// Settings source pinned to one operator-configured rate.
#[derive(Debug, Clone, Copy)]
pub struct FixedRateSettings(f64);

impl FixedRateSettings {
    /// Pin the source to `rate_per_km`.
    pub fn new(rate_per_km: f64) -> Self {
        Self(rate_per_km)
    }
}

#[async_trait]
impl SettingsSource for FixedRateSettings {
    async fn fetch_rate_per_km(&self) -> Result<Option<f64>, SettingsSourceError> {
        Ok(Some(self.0))
    }
}
