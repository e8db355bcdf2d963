//! File-backed durable quote store.
//!
//! One JSON document per pincode, named `delivery_cache_<pincode>.json`,
//! inside a capability-scoped directory handle. Pincodes are validated
//! six-digit strings, so the key itself is filesystem-safe. Unreadable
//! entries are pruned and treated as misses; the durable tier is a
//! best-effort optimisation, never a correctness requirement.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::warn;

use crate::domain::ports::{QuoteStoreBackend, QuoteStoreError};
use crate::domain::{CachedQuote, Pincode};

const ENTRY_PREFIX: &str = "delivery_cache_";
const ENTRY_SUFFIX: &str = ".json";

/// Durable quote store rooted at one cache directory.
pub struct FileQuoteStore {
    dir: Dir,
}

impl FileQuoteStore {
    /// Open the cache directory, creating it when missing.
    ///
    /// # Errors
    /// Returns the underlying I/O error when the directory cannot be created
    /// or opened.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Dir::create_ambient_dir_all(path.as_ref(), ambient_authority())?;
        let dir = Dir::open_ambient_dir(path.as_ref(), ambient_authority())?;
        Ok(Self { dir })
    }

    /// File name storing the entry for `pincode`.
    pub fn entry_name(pincode: &Pincode) -> String {
        format!("{ENTRY_PREFIX}{}{ENTRY_SUFFIX}", pincode.as_str())
    }

    fn is_entry_name(name: &str) -> bool {
        name.starts_with(ENTRY_PREFIX) && name.ends_with(ENTRY_SUFFIX)
    }
}

#[async_trait]
impl QuoteStoreBackend for FileQuoteStore {
    async fn load(&self, pincode: &Pincode) -> Result<Option<CachedQuote>, QuoteStoreError> {
        let name = Self::entry_name(pincode);
        let raw = match self.dir.read_to_string(&name) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(QuoteStoreError::backend(error.to_string())),
        };
        match serde_json::from_str(&raw) {
            Ok(entry) => Ok(Some(entry)),
            Err(error) => {
                warn!(%error, entry = %name, "pruning unreadable cache entry");
                if let Err(remove_error) = self.dir.remove_file(&name) {
                    if remove_error.kind() != io::ErrorKind::NotFound {
                        warn!(error = %remove_error, entry = %name, "prune failed");
                    }
                }
                Ok(None)
            }
        }
    }

    async fn save(&self, pincode: &Pincode, entry: &CachedQuote) -> Result<(), QuoteStoreError> {
        let encoded = serde_json::to_vec(entry)
            .map_err(|error| QuoteStoreError::serialization(error.to_string()))?;
        self.dir
            .write(Self::entry_name(pincode), &encoded)
            .map_err(|error| QuoteStoreError::backend(error.to_string()))
    }

    async fn remove(&self, pincode: &Pincode) -> Result<(), QuoteStoreError> {
        match self.dir.remove_file(Self::entry_name(pincode)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(QuoteStoreError::backend(error.to_string())),
        }
    }

    async fn clear(&self) -> Result<(), QuoteStoreError> {
        let entries = self
            .dir
            .entries()
            .map_err(|error| QuoteStoreError::backend(error.to_string()))?;
        for entry in entries {
            let entry = entry.map_err(|error| QuoteStoreError::backend(error.to_string()))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !Self::is_entry_name(name) {
                continue;
            }
            match self.dir.remove_file(name) {
                Ok(()) => {}
                Err(error) if error.kind() == io::ErrorKind::NotFound => {}
                Err(error) => return Err(QuoteStoreError::backend(error.to_string())),
            }
        }
        Ok(())
    }
}
