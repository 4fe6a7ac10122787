//! On-disk response cache keyed on the full request URL.
//!
//! Each entry is a bincode file named after the SHA-256 of the URL. Entries
//! carry their own store time; an entry older than the freshness window is
//! ignored and overwritten by the next successful fetch.

use crate::http::error::CacheError;
use crate::utils::ensure_cache_dir_exists;
use bincode::config::{Configuration, Fixint, LittleEndian};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;

const BINCODE_CONFIG: Configuration<LittleEndian, Fixint> =
    bincode::config::standard().with_fixed_int_encoding();

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    stored_at_ms: i64,
    body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    expire_after: Duration,
}

impl ResponseCache {
    /// Opens (and creates, if needed) a cache in `dir`.
    pub async fn new(dir: &Path, expire_after: Duration) -> Result<Self, CacheError> {
        ensure_cache_dir_exists(dir).await?;
        Ok(Self {
            dir: dir.to_path_buf(),
            expire_after,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        let key = hex::encode(Sha256::digest(url.as_bytes()));
        self.dir.join(format!("{key}.bin"))
    }

    /// Returns the stored body for `url` if there is one younger than the
    /// freshness window.
    pub async fn get(&self, url: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.entry_path(url);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::CacheRead(path, e)),
        };
        let (entry, _) = bincode::serde::decode_from_slice::<CacheEntry, _>(&bytes, BINCODE_CONFIG)
            .map_err(|e| CacheError::CacheDecode(path.clone(), Box::new(e)))?;

        if entry.url != url {
            return Ok(None);
        }
        let age_ms = Utc::now().timestamp_millis() - entry.stored_at_ms;
        if age_ms < 0 || age_ms as u128 >= self.expire_after.as_millis() {
            return Ok(None);
        }
        Ok(Some(entry.body))
    }

    /// Stores `body` as the current response for `url`.
    pub async fn put(&self, url: &str, body: &[u8]) -> Result<(), CacheError> {
        let entry = CacheEntry {
            url: url.to_string(),
            stored_at_ms: Utc::now().timestamp_millis(),
            body: body.to_vec(),
        };
        let encoded = bincode::serde::encode_to_vec(&entry, BINCODE_CONFIG)
            .map_err(|e| CacheError::CacheEncode(Box::new(e)))?;
        let path = self.entry_path(url);
        tokio::fs::write(&path, &encoded)
            .await
            .map_err(|e| CacheError::CacheWrite(path, e))
    }
}
