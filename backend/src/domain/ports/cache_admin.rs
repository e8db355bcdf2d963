//! Driving port for cache maintenance operations.

use async_trait::async_trait;

use crate::domain::{Error, Pincode};

/// Maintenance surface for clearing cached quotes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeliveryCacheAdmin: Send + Sync {
    /// Clear one pincode's cached quote, or every entry when `pincode` is
    /// `None`. Both cache tiers are affected.
    ///
    /// # Errors
    /// Returns an error when the durable tier rejects the operation.
    async fn clear_cache(&self, pincode: Option<Pincode>) -> Result<(), Error>;
}

/// Fixture admin that accepts every clear without side effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureDeliveryCacheAdmin;

#[async_trait]
impl DeliveryCacheAdmin for FixtureDeliveryCacheAdmin {
    async fn clear_cache(&self, _pincode: Option<Pincode>) -> Result<(), Error> {
        Ok(())
    }
}
