//! File-backed delivery zone repository.
//!
//! Zones are operator-provisioned reference data: a single JSON array read
//! from disk on every fetch so an admin-triggered refresh picks up edits
//! without a restart.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;

use crate::domain::DeliveryZone;
use crate::domain::ports::{ZoneRepository, ZoneRepositoryError};

/// Zone repository reading one JSON file from a capability-scoped directory.
pub struct FileZoneRepository {
    dir: Dir,
    file_name: String,
}

impl FileZoneRepository {
    /// Open the repository for `file_name` inside `dir_path`.
    ///
    /// # Errors
    /// Returns the underlying I/O error when the directory cannot be opened.
    pub fn open(dir_path: impl AsRef<Path>, file_name: impl Into<String>) -> io::Result<Self> {
        let dir = Dir::open_ambient_dir(dir_path.as_ref(), ambient_authority())?;
        Ok(Self {
            dir,
            file_name: file_name.into(),
        })
    }
}

#[async_trait]
impl ZoneRepository for FileZoneRepository {
    async fn fetch_zones(&self) -> Result<Vec<DeliveryZone>, ZoneRepositoryError> {
        let raw = self
            .dir
            .read_to_string(&self.file_name)
            .map_err(|error| ZoneRepositoryError::backend(error.to_string()))?;
        serde_json::from_str(&raw)
            .map_err(|error| ZoneRepositoryError::decode(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Zone file parsing coverage.
    use super::FileZoneRepository;
    use crate::domain::ports::{ZoneRepository, ZoneRepositoryError};

    const ZONES_JSON: &str = r#"[
        {
            "zone_name": "City",
            "min_distance_km": 0.0,
            "max_distance_km": 10.0,
            "delivery_charge": 40,
            "is_active": true
        },
        {
            "zone_name": "Suburbs",
            "min_distance_km": 10.0,
            "max_distance_km": 25.0,
            "delivery_charge": 120,
            "is_active": false
        }
    ]"#;

    #[tokio::test]
    async fn reads_and_decodes_the_zone_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("zones.json"), ZONES_JSON).expect("write zones");
        let repository = FileZoneRepository::open(dir.path(), "zones.json").expect("open");

        let zones = repository.fetch_zones().await.expect("zones decode");
        assert_eq!(zones.len(), 2);
        assert_eq!(zones.first().map(|z| z.zone_name.as_str()), Some("City"));
        assert_eq!(zones.get(1).map(|z| z.is_active), Some(false));
    }

    #[tokio::test]
    async fn missing_files_surface_as_backend_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let repository = FileZoneRepository::open(dir.path(), "zones.json").expect("open");

        let error = repository.fetch_zones().await.expect_err("must fail");
        assert!(matches!(error, ZoneRepositoryError::Backend { .. }));
    }

    #[tokio::test]
    async fn malformed_zone_files_surface_as_decode_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("zones.json"), b"{}").expect("write zones");
        let repository = FileZoneRepository::open(dir.path(), "zones.json").expect("open");

        let error = repository.fetch_zones().await.expect_err("must fail");
        assert!(matches!(error, ZoneRepositoryError::Decode { .. }));
    }
}
