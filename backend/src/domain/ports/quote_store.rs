//! Driven port for quote cache storage backends.
//!
//! Backends are dumb key-value stores: they persist [`CachedQuote`] entries
//! verbatim and never interpret timestamps. TTL semantics live in one place,
//! [`crate::domain::TtlCache`], which wraps a backend per tier.

use std::sync::Arc;

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{CachedQuote, Pincode};

define_port_error! {
    /// Errors surfaced by a cache storage backend.
    pub enum QuoteStoreError {
        /// The backing store is unavailable or rejected the operation.
        Backend => "quote store backend failure: {message}",
        /// Serialisation or deserialisation of a stored entry failed.
        Serialization => "quote store serialisation failed: {message}",
    }
}

/// Storage backend for one cache tier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteStoreBackend: Send + Sync {
    /// Load the entry stored for `pincode`, if any.
    async fn load(&self, pincode: &Pincode) -> Result<Option<CachedQuote>, QuoteStoreError>;

    /// Store `entry` for `pincode`, replacing any previous entry.
    async fn save(&self, pincode: &Pincode, entry: &CachedQuote) -> Result<(), QuoteStoreError>;

    /// Remove the entry stored for `pincode`; absent entries are not an error.
    async fn remove(&self, pincode: &Pincode) -> Result<(), QuoteStoreError>;

    /// Remove every entry owned by this backend.
    async fn clear(&self) -> Result<(), QuoteStoreError>;
}

#[async_trait]
impl<B: QuoteStoreBackend + ?Sized> QuoteStoreBackend for Arc<B> {
    async fn load(&self, pincode: &Pincode) -> Result<Option<CachedQuote>, QuoteStoreError> {
        self.as_ref().load(pincode).await
    }

    async fn save(&self, pincode: &Pincode, entry: &CachedQuote) -> Result<(), QuoteStoreError> {
        self.as_ref().save(pincode, entry).await
    }

    async fn remove(&self, pincode: &Pincode) -> Result<(), QuoteStoreError> {
        self.as_ref().remove(pincode).await
    }

    async fn clear(&self) -> Result<(), QuoteStoreError> {
        self.as_ref().clear().await
    }
}

/// Fixture backend that stores nothing and always misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureQuoteStore;

#[async_trait]
impl QuoteStoreBackend for FixtureQuoteStore {
    async fn load(&self, _pincode: &Pincode) -> Result<Option<CachedQuote>, QuoteStoreError> {
        Ok(None)
    }

    async fn save(&self, _pincode: &Pincode, _entry: &CachedQuote) -> Result<(), QuoteStoreError> {
        Ok(())
    }

    async fn remove(&self, _pincode: &Pincode) -> Result<(), QuoteStoreError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), QuoteStoreError> {
        Ok(())
    }
}
