//! Domain types, ports, and the delivery pricing services.
//!
//! Everything here is transport agnostic: inbound adapters translate HTTP
//! requests into these operations, outbound adapters implement the driven
//! ports in [`ports`].

pub mod cache;
pub mod error;
pub mod pincode;
pub mod ports;
pub mod pricing;
pub mod quote;
mod quote_service;
pub mod zones;

pub use self::cache::{CACHE_TTL, MemoryQuoteStore, TtlCache};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::pincode::{Pincode, PincodeValidationError};
pub use self::pricing::PricingRules;
pub use self::quote::{CachedQuote, DeliveryQuote, GeoCoordinate};
pub use self::quote_service::{
    DeliveryPricingService, INVALID_PINCODE_MESSAGE, NO_ROUTE_MESSAGE, PINCODE_NOT_FOUND_MESSAGE,
    RESOLVER_FAILED_MESSAGE,
};
pub use self::zones::{DeliveryZone, ZoneCatalogue};

/// Response header carrying the request-scoped trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
