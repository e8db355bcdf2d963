//! Charge rules applied to a resolved driving route.
//!
//! The charge model is linear rate-per-km. Distances are rounded to one
//! decimal place BEFORE the rate multiplication; downstream consumers rely on
//! numeric parity with that ordering, so it must not be rearranged.

use crate::domain::ports::DriveRoute;
use crate::domain::{DeliveryQuote, GeoCoordinate, Pincode};

/// Rate applied until the settings source supplies an authoritative value.
pub const DEFAULT_RATE_PER_KM: f64 = 10.0;

/// Furthest driving distance the store will deliver to.
pub const MAX_DELIVERY_DISTANCE_KM: f64 = 50.0;

/// The store's own pincode; orders here ship free.
pub const STORE_PINCODE: &str = "440024";

/// The store's location, the fixed origin of every route calculation.
pub const STORE_LOCATION: GeoCoordinate = GeoCoordinate {
    lat: 21.1458,
    lng: 79.0882,
};

/// Fixed pricing rules owned by the coordinator.
#[derive(Debug, Clone)]
pub struct PricingRules {
    /// Route origin for every distance calculation.
    pub origin: GeoCoordinate,
    /// Pincode that qualifies for free same-location delivery.
    pub store_pincode: Pincode,
    /// Serviceable distance cap in kilometres.
    pub max_distance_km: f64,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            origin: STORE_LOCATION,
            store_pincode: Pincode::parse(STORE_PINCODE).expect("store pincode constant is valid"),
            max_distance_km: MAX_DELIVERY_DISTANCE_KM,
        }
    }
}

/// Round a raw kilometre distance to one decimal place.
pub fn round_distance_km(raw: f64) -> f64 {
    (raw * 10.0).round() / 10.0
}

/// Price a resolved route, applying the overriding rules in order:
/// distance cap, same-location free delivery, then linear rate.
pub fn price_route(
    rules: &PricingRules,
    pincode: &Pincode,
    route: &DriveRoute,
    destination: GeoCoordinate,
    rate_per_km: f64,
) -> DeliveryQuote {
    let distance_km = round_distance_km(route.distance_km);
    if distance_km > rules.max_distance_km {
        return DeliveryQuote {
            distance_km,
            error: Some(format!(
                "Delivery is not available: this address is {distance_km:.1} km away, \
                 beyond our {:.0} km delivery range.",
                rules.max_distance_km
            )),
            ..DeliveryQuote::unavailable(String::new())
        };
    }

    let delivery_charge = if pincode == &rules.store_pincode {
        0
    } else {
        (distance_km * rate_per_km).round() as u32
    };

    DeliveryQuote {
        distance_km,
        delivery_charge,
        duration_minutes: Some(route.duration_minutes.round() as u32),
        delivery_unavailable: false,
        error: None,
        coordinates: Some(destination),
        rate_per_km: Some(rate_per_km),
    }
}
