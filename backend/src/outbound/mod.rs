//! Outbound adapters implementing the domain's driven ports.

pub mod cache;
pub mod geocoding;
pub mod routing;
pub mod zones;

pub use cache::FileQuoteStore;
pub use geocoding::{GeocoderBuildError, NominatimGeocoder};
pub use routing::{OsrmRouter, RouterBuildError};
pub use zones::FileZoneRepository;
