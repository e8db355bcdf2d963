//! Delivery distance pricing backend for the Sabziwala vegetable storefront.
//!
//! The crate is laid out hexagonally: [`domain`] owns types, ports, and the
//! pricing coordinator; [`outbound`] implements the driven ports (geocoding,
//! routing, durable cache, zone file); [`inbound`] exposes the REST surface.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use doc::ApiDoc;
pub use middleware::Trace;
