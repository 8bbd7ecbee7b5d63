use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::store::StoreError;

/// Named storage buckets, one JSON array each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Donors,
    Recipients,
    Notifications,
}

impl Bucket {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Donors => "donors",
            Self::Recipients => "recipients",
            Self::Notifications => "notifications",
        }
    }

    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.json", self.name())
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Best-effort JSON file storage, one file per bucket under a data directory.
///
/// A bucket that has never been written loads as empty. Writes replace the
/// whole bucket through a temporary file in the same directory, persisted
/// over the old one.
#[derive(Debug, Clone)]
pub struct JsonBuckets {
    dir: PathBuf,
}

impl JsonBuckets {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path(&self, bucket: Bucket) -> PathBuf {
        self.dir.join(bucket.file_name())
    }

    /// Load every entry of a bucket
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file exists but cannot be read, or
    /// `StoreError::Parse` if its contents are not a JSON array of `T`.
    pub fn load<T: DeserializeOwned>(&self, bucket: Bucket) -> Result<Vec<T>, StoreError> {
        let path = self.path(bucket);
        if !path.exists() {
            tracing::debug!(
                "Bucket {} not found at {}, starting empty",
                bucket,
                path.display()
            );
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
            bucket: bucket.name(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            bucket: bucket.name(),
            source,
        })
    }

    /// Replace the contents of a bucket
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory or file cannot be written.
    pub fn save<T: Serialize>(&self, bucket: Bucket, items: &[T]) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            bucket: bucket.name(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(io_error)?;

        let json = serde_json::to_string_pretty(items).map_err(|source| StoreError::Parse {
            bucket: bucket.name(),
            source,
        })?;

        let path = self.path(bucket);
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(io_error)?;
        tmp.write_all(json.as_bytes()).map_err(io_error)?;
        tmp.persist(&path).map_err(|e| io_error(e.error))?;

        tracing::debug!("Saved {} entries to {}", items.len(), path.display());
        Ok(())
    }
}
