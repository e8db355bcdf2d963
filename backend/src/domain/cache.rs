//! TTL-checked quote cache over a pluggable storage backend.
//!
//! Expiry logic lives here once; the coordinator instantiates the cache twice
//! with different backends (the process-lifetime memory map and the durable
//! file store). Stale entries are evicted lazily on read.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{QuoteStoreBackend, QuoteStoreError};
use crate::domain::{CachedQuote, DeliveryQuote, Pincode};

/// How long a cached quote stays servable.
pub const CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// One cache tier: a storage backend plus TTL bookkeeping.
pub struct TtlCache<B> {
    backend: B,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<B: QuoteStoreBackend> TtlCache<B> {
    /// Wrap `backend` as a tier with the given TTL.
    pub fn new(backend: B, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            ttl,
            clock,
        }
    }

    /// Stamp `quote` with the tier's current time.
    pub fn stamp(&self, quote: DeliveryQuote) -> CachedQuote {
        CachedQuote::stamped(quote, self.clock.utc())
    }

    /// Read the fresh entry for `pincode`, evicting a stale one on the way.
    ///
    /// # Errors
    /// Propagates backend read/remove failures.
    pub async fn get(&self, pincode: &Pincode) -> Result<Option<CachedQuote>, QuoteStoreError> {
        let Some(entry) = self.backend.load(pincode).await? else {
            return Ok(None);
        };
        if entry.is_fresh(self.clock.utc(), self.ttl) {
            return Ok(Some(entry));
        }
        self.backend.remove(pincode).await?;
        Ok(None)
    }

    /// Store `entry` verbatim, preserving its original timestamp.
    ///
    /// Used both for fresh writes (after [`TtlCache::stamp`]) and for
    /// backfilling one tier from another without resetting the TTL window.
    ///
    /// # Errors
    /// Propagates backend write failures.
    pub async fn put_entry(
        &self,
        pincode: &Pincode,
        entry: &CachedQuote,
    ) -> Result<(), QuoteStoreError> {
        self.backend.save(pincode, entry).await
    }

    /// Drop the entry for `pincode`, if any.
    ///
    /// # Errors
    /// Propagates backend remove failures.
    pub async fn remove(&self, pincode: &Pincode) -> Result<(), QuoteStoreError> {
        self.backend.remove(pincode).await
    }

    /// Drop every entry in this tier.
    ///
    /// # Errors
    /// Propagates backend clear failures.
    pub async fn clear(&self) -> Result<(), QuoteStoreError> {
        self.backend.clear().await
    }
}

/// Process-lifetime in-memory backend for the fast tier.
#[derive(Debug, Default)]
pub struct MemoryQuoteStore {
    entries: Mutex<HashMap<String, CachedQuote>>,
}

impl MemoryQuoteStore {
    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, CachedQuote>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of stored entries; used by maintenance logging and tests.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether the tier holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

#[async_trait]
impl QuoteStoreBackend for MemoryQuoteStore {
    async fn load(&self, pincode: &Pincode) -> Result<Option<CachedQuote>, QuoteStoreError> {
        Ok(self.entries().get(pincode.as_str()).cloned())
    }

    async fn save(&self, pincode: &Pincode, entry: &CachedQuote) -> Result<(), QuoteStoreError> {
        self.entries()
            .insert(pincode.as_str().to_owned(), entry.clone());
        Ok(())
    }

    async fn remove(&self, pincode: &Pincode) -> Result<(), QuoteStoreError> {
        self.entries().remove(pincode.as_str());
        Ok(())
    }

    async fn clear(&self) -> Result<(), QuoteStoreError> {
        self.entries().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! TTL expiry behaviour driven by an injected clock.
    use super::{CACHE_TTL, MemoryQuoteStore, TtlCache};
    use crate::domain::ports::{MockQuoteStoreBackend, QuoteStoreBackend};
    use crate::domain::{CachedQuote, DeliveryQuote, Pincode};
    use crate::test_support::MutableClock;
    use std::sync::Arc;
    use std::time::Duration;

    fn pincode() -> Pincode {
        Pincode::parse("440001").expect("valid pincode")
    }

    fn quote() -> DeliveryQuote {
        DeliveryQuote::unavailable("no route")
    }

    fn tier(clock: &Arc<MutableClock>) -> TtlCache<MemoryQuoteStore> {
        TtlCache::new(
            MemoryQuoteStore::default(),
            CACHE_TTL,
            Arc::clone(clock) as Arc<dyn mockable::Clock>,
        )
    }

    #[tokio::test]
    async fn fresh_entries_are_returned() {
        let clock = Arc::new(MutableClock::fixed());
        let cache = tier(&clock);
        let entry = cache.stamp(quote());
        cache.put_entry(&pincode(), &entry).await.expect("write");

        clock.advance(Duration::from_secs(29 * 60));
        let hit = cache.get(&pincode()).await.expect("read");
        assert_eq!(hit, Some(entry));
    }

    #[tokio::test]
    async fn stale_entries_are_evicted_on_read() {
        let clock = Arc::new(MutableClock::fixed());
        let cache = tier(&clock);
        let entry = cache.stamp(quote());
        cache.put_entry(&pincode(), &entry).await.expect("write");

        clock.advance(Duration::from_secs(31 * 60));
        assert_eq!(cache.get(&pincode()).await.expect("read"), None);
    }

    #[tokio::test]
    async fn stale_read_issues_backend_remove() {
        let clock = Arc::new(MutableClock::fixed());
        let stale = CachedQuote::stamped(quote(), clock.now() - chrono::TimeDelta::minutes(31));

        let mut backend = MockQuoteStoreBackend::new();
        let loaded = stale.clone();
        backend
            .expect_load()
            .times(1)
            .return_once(move |_| Ok(Some(loaded)));
        backend.expect_remove().times(1).return_once(|_| Ok(()));

        let cache = TtlCache::new(backend, CACHE_TTL, Arc::clone(&clock) as Arc<dyn mockable::Clock>);
        assert_eq!(cache.get(&pincode()).await.expect("read"), None);
    }

    #[tokio::test]
    async fn backfilled_entries_keep_their_original_timestamp() {
        let clock = Arc::new(MutableClock::fixed());
        let cache = tier(&clock);
        let entry = cache.stamp(quote());

        clock.advance(Duration::from_secs(10 * 60));
        cache.put_entry(&pincode(), &entry).await.expect("backfill");

        // 21 further minutes put the entry past its ORIGINAL stamp's TTL.
        clock.advance(Duration::from_secs(21 * 60));
        assert_eq!(cache.get(&pincode()).await.expect("read"), None);
    }

    #[tokio::test]
    async fn memory_store_clear_empties_all_entries() {
        let store = MemoryQuoteStore::default();
        let first = Pincode::parse("440001").expect("valid");
        let second = Pincode::parse("440002").expect("valid");
        let entry = CachedQuote::stamped(quote(), chrono::Utc::now());

        store.save(&first, &entry).await.expect("write");
        store.save(&second, &entry).await.expect("write");
        assert_eq!(store.len(), 2);

        store.clear().await.expect("clear");
        assert!(store.is_empty());
    }
}
