//! Server configuration loaded via OrthoConfig.

use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_GEOCODING_ENDPOINT: &str = "https://nominatim.openstreetmap.org/";
const DEFAULT_ROUTING_ENDPOINT: &str = "https://router.project-osrm.org/";
const DEFAULT_OUTBOUND_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_CACHE_DIR: &str = "var/delivery-cache";

/// Configuration values controlling server wiring.
///
/// Domain constants (store location, store pincode, distance cap, TTL) are
/// deliberately NOT configuration; see `backend::domain::pricing`.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DELIVERY")]
pub struct DeliverySettings {
    /// Interface to bind the HTTP listener to.
    pub bind_addr: Option<String>,
    /// Port to bind the HTTP listener to.
    pub port: Option<u16>,
    /// Base URL of the geocoding provider.
    pub geocoding_endpoint: Option<String>,
    /// Base URL of the routing provider.
    pub routing_endpoint: Option<String>,
    /// Deadline applied to each outbound provider call.
    pub outbound_timeout_seconds: Option<u64>,
    /// Directory holding the durable quote cache.
    pub cache_dir: Option<PathBuf>,
    /// Optional zone table file; the built-in ladder is used when absent.
    pub zones_file: Option<PathBuf>,
    /// Optional operator override for the rate per kilometre.
    pub rate_per_km: Option<f64>,
}

impl DeliverySettings {
    /// Bind interface, falling back to all interfaces.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Listener port, falling back to the default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Geocoding endpoint, falling back to the public instance.
    pub fn geocoding_endpoint(&self) -> &str {
        self.geocoding_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_GEOCODING_ENDPOINT)
    }

    /// Routing endpoint, falling back to the public instance.
    pub fn routing_endpoint(&self) -> &str {
        self.routing_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_ROUTING_ENDPOINT)
    }

    /// Outbound call deadline in seconds.
    pub fn outbound_timeout_seconds(&self) -> u64 {
        self.outbound_timeout_seconds
            .unwrap_or(DEFAULT_OUTBOUND_TIMEOUT_SECONDS)
    }

    /// Durable cache directory.
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR))
    }

    /// Configured zone file, if any.
    pub fn zones_file(&self) -> Option<&Path> {
        self.zones_file.as_deref()
    }
}
