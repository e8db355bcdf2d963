//! Delivery pricing coordinator.
//!
//! The public quote operation orchestrates, in strict order: input
//! normalisation and validation, the fast in-memory tier, the durable tier,
//! in-flight coalescing, and finally live resolution through the geocoding
//! and routing ports. Soft failures (unknown pincode, no route, beyond the
//! distance cap) are cached like successes because they reflect a stable
//! fact about the address; transient resolver faults are returned but never
//! cached, so the next caller retries the network path.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use async_trait::async_trait;
use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::cache::{CACHE_TTL, MemoryQuoteStore, TtlCache};
use crate::domain::ports::{
    DeliveryCacheAdmin, DeliveryQuoteQuery, GeocodingSource, QuoteStoreBackend, RoutingSource,
    SettingsSource,
};
use crate::domain::pricing::{self, PricingRules};
use crate::domain::{DeliveryQuote, Error, Pincode};

/// Message returned for input failing pincode validation.
pub const INVALID_PINCODE_MESSAGE: &str = "Please enter a valid 6-digit pincode.";

/// Message returned when geocoding finds no match for the pincode.
pub const PINCODE_NOT_FOUND_MESSAGE: &str =
    "We could not locate this pincode. Please check it and try again.";

/// Message returned when routing finds no drivable path.
pub const NO_ROUTE_MESSAGE: &str = "No driving route could be found to this pincode.";

/// Message returned for transient resolver faults.
pub const RESOLVER_FAILED_MESSAGE: &str =
    "Unable to calculate the delivery charge right now. Please try again.";

type SharedResolution = Shared<BoxFuture<'static, DeliveryQuote>>;

enum Resolution {
    /// Determinate outcome, cacheable at full TTL.
    Cacheable(DeliveryQuote),
    /// Transient fault; the next call must retry the resolvers.
    Uncacheable(DeliveryQuote),
}

struct PricingState<S> {
    geocoder: Arc<dyn GeocodingSource>,
    router: Arc<dyn RoutingSource>,
    settings: Arc<dyn SettingsSource>,
    memory: TtlCache<MemoryQuoteStore>,
    durable: TtlCache<S>,
    in_flight: Mutex<HashMap<Pincode, SharedResolution>>,
    rate_per_km: RwLock<f64>,
    rules: PricingRules,
}

/// Coordinator owning both cache tiers and the in-flight registry.
///
/// Cloning is cheap and shares all state, so handlers and background tasks
/// can hold their own copies.
pub struct DeliveryPricingService<S> {
    state: Arc<PricingState<S>>,
}

impl<S> Clone for DeliveryPricingService<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: QuoteStoreBackend + 'static> DeliveryPricingService<S> {
    /// Build a coordinator over the supplied ports.
    ///
    /// Both cache tiers share `clock` so one resolution stamps both tiers
    /// with the same instant.
    pub fn new(
        geocoder: Arc<dyn GeocodingSource>,
        router: Arc<dyn RoutingSource>,
        settings: Arc<dyn SettingsSource>,
        durable_backend: S,
        clock: Arc<dyn Clock>,
        rules: PricingRules,
    ) -> Self {
        let memory = TtlCache::new(MemoryQuoteStore::default(), CACHE_TTL, Arc::clone(&clock));
        let durable = TtlCache::new(durable_backend, CACHE_TTL, clock);
        Self {
            state: Arc::new(PricingState {
                geocoder,
                router,
                settings,
                memory,
                durable,
                in_flight: Mutex::new(HashMap::new()),
                rate_per_km: RwLock::new(pricing::DEFAULT_RATE_PER_KM),
                rules,
            }),
        }
    }
}

impl<S: QuoteStoreBackend + 'static> PricingState<S> {
    fn in_flight(&self) -> MutexGuard<'_, HashMap<Pincode, SharedResolution>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_rate(&self) -> f64 {
        *self
            .rate_per_km
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn record_rate(&self, rate: f64) {
        *self
            .rate_per_km
            .write()
            .unwrap_or_else(PoisonError::into_inner) = rate;
    }

    /// Check both cache tiers, backfilling the fast tier on a durable hit.
    async fn cached_quote(&self, pincode: &Pincode) -> Option<DeliveryQuote> {
        match self.memory.get(pincode).await {
            Ok(Some(entry)) => return Some(entry.quote),
            Ok(None) => {}
            Err(error) => warn!(%error, %pincode, "memory cache read failed"),
        }
        match self.durable.get(pincode).await {
            Ok(Some(entry)) => {
                if let Err(error) = self.memory.put_entry(pincode, &entry).await {
                    warn!(%error, %pincode, "memory cache backfill failed");
                }
                Some(entry.quote)
            }
            Ok(None) => None,
            Err(error) => {
                warn!(%error, %pincode, "durable cache read failed");
                None
            }
        }
    }

    /// Join the in-flight resolution for `pincode`, registering a new one
    /// when none exists. Check-then-register happens under one lock so
    /// near-simultaneous callers coalesce instead of racing the resolvers.
    fn join_resolution(self: &Arc<Self>, pincode: &Pincode) -> SharedResolution {
        let mut in_flight = self.in_flight();
        if let Some(pending) = in_flight.get(pincode) {
            debug!(%pincode, "coalescing onto in-flight resolution");
            return pending.clone();
        }
        let state = Arc::clone(self);
        let key = pincode.clone();
        let pending: SharedResolution =
            async move { state.resolve_and_cache(key).await }.boxed().shared();
        in_flight.insert(pincode.clone(), pending.clone());
        pending
    }

    async fn resolve_and_cache(self: Arc<Self>, pincode: Pincode) -> DeliveryQuote {
        let quote = match self.resolve(&pincode).await {
            Resolution::Cacheable(quote) => {
                let entry = self.memory.stamp(quote.clone());
                if let Err(error) = self.memory.put_entry(&pincode, &entry).await {
                    warn!(%error, %pincode, "memory cache write failed");
                }
                if let Err(error) = self.durable.put_entry(&pincode, &entry).await {
                    warn!(%error, %pincode, "durable cache write failed");
                }
                quote
            }
            Resolution::Uncacheable(quote) => quote,
        };
        // The registry entry goes regardless of outcome; a stuck entry would
        // pin every later caller of this pincode to a settled future.
        self.in_flight().remove(&pincode);
        quote
    }

    async fn resolve(&self, pincode: &Pincode) -> Resolution {
        let destination = match self.geocoder.geocode(pincode).await {
            Ok(Some(coordinate)) => coordinate,
            Ok(None) => {
                debug!(%pincode, "geocoding found no match");
                return Resolution::Cacheable(DeliveryQuote::unavailable(
                    PINCODE_NOT_FOUND_MESSAGE,
                ));
            }
            Err(error) => {
                warn!(%error, %pincode, "geocoding call failed");
                return Resolution::Uncacheable(DeliveryQuote::unavailable(
                    RESOLVER_FAILED_MESSAGE,
                ));
            }
        };

        let route = match self.router.drive_route(self.rules.origin, destination).await {
            Ok(Some(route)) => route,
            Ok(None) => {
                debug!(%pincode, "routing found no drivable path");
                return Resolution::Cacheable(DeliveryQuote::unavailable(NO_ROUTE_MESSAGE));
            }
            Err(error) => {
                warn!(%error, %pincode, "routing call failed");
                return Resolution::Uncacheable(DeliveryQuote::unavailable(
                    RESOLVER_FAILED_MESSAGE,
                ));
            }
        };

        let rate_per_km = self.effective_rate().await;
        let quote = pricing::price_route(&self.rules, pincode, &route, destination, rate_per_km);
        if quote.is_serviceable() {
            self.record_rate(rate_per_km);
        }
        Resolution::Cacheable(quote)
    }

    /// Ask the settings source for the authoritative rate, falling back to
    /// the last known rate when it has no value or fails.
    async fn effective_rate(&self) -> f64 {
        let fallback = self.current_rate();
        match self.settings.fetch_rate_per_km().await {
            Ok(Some(rate)) if rate > 0.0 => rate,
            Ok(Some(rate)) => {
                warn!(rate, "ignoring non-positive configured rate");
                fallback
            }
            Ok(None) => fallback,
            Err(error) => {
                warn!(%error, "settings fetch failed, using last known rate");
                fallback
            }
        }
    }
}

#[async_trait]
impl<S: QuoteStoreBackend + 'static> DeliveryQuoteQuery for DeliveryPricingService<S> {
    async fn quote(&self, raw_pincode: &str) -> DeliveryQuote {
        let pincode = match Pincode::parse(raw_pincode) {
            Ok(pincode) => pincode,
            Err(error) => {
                debug!(%error, raw = raw_pincode, "rejected malformed pincode");
                return DeliveryQuote::unavailable(INVALID_PINCODE_MESSAGE);
            }
        };

        if let Some(quote) = self.state.cached_quote(&pincode).await {
            return quote;
        }

        self.state.join_resolution(&pincode).await
    }

    fn rate_per_km(&self) -> f64 {
        self.state.current_rate()
    }
}

#[async_trait]
impl<S: QuoteStoreBackend + 'static> DeliveryCacheAdmin for DeliveryPricingService<S> {
    async fn clear_cache(&self, pincode: Option<Pincode>) -> Result<(), Error> {
        let map_error =
            |error| Error::service_unavailable(format!("cache maintenance failed: {error}"));
        match pincode {
            Some(pincode) => {
                self.state.memory.remove(&pincode).await.map_err(map_error)?;
                self.state.durable.remove(&pincode).await.map_err(map_error)?;
            }
            None => {
                self.state.memory.clear().await.map_err(map_error)?;
                self.state.durable.clear().await.map_err(map_error)?;
            }
        }
        Ok(())
    }
}
