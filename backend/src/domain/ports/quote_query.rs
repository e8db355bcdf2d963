//! Driving port for requesting delivery quotes.

use async_trait::async_trait;

use crate::domain::DeliveryQuote;

/// Use-case surface consumed by inbound adapters.
///
/// Quote requests never error: every outcome, including unavailability and
/// resolver faults, is represented on the returned [`DeliveryQuote`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeliveryQuoteQuery: Send + Sync {
    /// Produce a quote for a raw, caller-supplied pincode string.
    async fn quote(&self, raw_pincode: &str) -> DeliveryQuote;

    /// Rate currently applied to live resolutions, per kilometre.
    fn rate_per_km(&self) -> f64;
}

/// Fixture query returning one canned serviceable quote.
#[derive(Debug, Clone)]
pub struct FixtureDeliveryQuoteQuery(pub DeliveryQuote);

#[async_trait]
impl DeliveryQuoteQuery for FixtureDeliveryQuoteQuery {
    async fn quote(&self, _raw_pincode: &str) -> DeliveryQuote {
        self.0.clone()
    }

    fn rate_per_km(&self) -> f64 {
        self.0.rate_per_km.unwrap_or(crate::domain::pricing::DEFAULT_RATE_PER_KM)
    }
}
