//! Delivery quote types shared by the pricing pipeline and both cache tiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A WGS84 coordinate produced by the geocoding step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoCoordinate {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

/// The outcome of one pricing resolution: the unit of cache storage and the
/// return value of the public quote operation.
///
/// ## Invariants
/// - `delivery_unavailable == true` implies `delivery_charge == 0`.
/// - A serviceable quote always carries `coordinates` and a non-negative
///   `distance_km` (rounded to one decimal place).
/// - `error` is present iff the quote records a soft failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryQuote {
    /// Driving distance from the store, rounded to one decimal place.
    pub distance_km: f64,
    /// Delivery charge in whole currency units.
    pub delivery_charge: u32,
    /// Driving duration rounded to whole minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Whether delivery is unavailable for this pincode.
    pub delivery_unavailable: bool,
    /// Human-readable reason when the quote records a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Destination coordinate; present only on successful resolutions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoCoordinate>,
    /// Rate applied at calculation time, in currency units per kilometre.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_per_km: Option<f64>,
}

impl DeliveryQuote {
    /// Build an unavailable quote carrying `message` as its reason.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            distance_km: 0.0,
            delivery_charge: 0,
            duration_minutes: None,
            delivery_unavailable: true,
            error: Some(message.into()),
            coordinates: None,
            rate_per_km: None,
        }
    }

    /// Whether this quote offers delivery.
    pub fn is_serviceable(&self) -> bool {
        !self.delivery_unavailable
    }
}

/// One cache entry: a quote plus the instant it was stored.
///
/// Freshness is judged against a fixed TTL by [`CachedQuote::is_fresh`]; the
/// storage backends never interpret the timestamp themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedQuote {
    /// The stored quote.
    pub quote: DeliveryQuote,
    /// Storage instant as epoch milliseconds.
    pub cached_at_ms: i64,
}

impl CachedQuote {
    /// Stamp `quote` with the supplied storage instant.
    pub fn stamped(quote: DeliveryQuote, now: DateTime<Utc>) -> Self {
        Self {
            quote,
            cached_at_ms: now.timestamp_millis(),
        }
    }

    /// Whether the entry is still within `ttl` as of `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age_ms = now.timestamp_millis().saturating_sub(self.cached_at_ms);
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        age_ms < ttl_ms
    }
}

#[cfg(test)]
mod tests {
    //! Serialisation parity and freshness checks for quote types.
    use super::{CachedQuote, DeliveryQuote, GeoCoordinate};
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    fn serviceable_quote() -> DeliveryQuote {
        DeliveryQuote {
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
        }
    }

    #[test]
    fn quote_serialises_camel_case_and_omits_empty_options() {
        let encoded =
            serde_json::to_value(DeliveryQuote::unavailable("out of range")).expect("serialise");
        assert_eq!(encoded["deliveryUnavailable"], true);
        assert_eq!(encoded["deliveryCharge"], 0);
        assert_eq!(encoded["error"], "out of range");
        assert!(encoded.get("coordinates").is_none());
        assert!(encoded.get("durationMinutes").is_none());
    }

    #[test]
    fn quote_round_trips_through_json() {
        let quote = serviceable_quote();
        let encoded = serde_json::to_string(&quote).expect("serialise");
        let decoded: DeliveryQuote = serde_json::from_str(&encoded).expect("deserialise");
        assert_eq!(decoded, quote);
    }

    #[test]
    fn unavailable_quotes_carry_no_charge() {
        let quote = DeliveryQuote::unavailable("no route");
        assert!(!quote.is_serviceable());
        assert_eq!(quote.delivery_charge, 0);
    }

    #[test]
    fn entry_freshness_respects_ttl_boundary() {
        let stored = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().expect("time");
        let entry = CachedQuote::stamped(serviceable_quote(), stored);
        let ttl = Duration::from_secs(30 * 60);

        let within = stored + chrono::TimeDelta::minutes(29);
        assert!(entry.is_fresh(within, ttl));

        let at_boundary = stored + chrono::TimeDelta::minutes(30);
        assert!(!entry.is_fresh(at_boundary, ttl), "exact TTL age is stale");
    }
}
