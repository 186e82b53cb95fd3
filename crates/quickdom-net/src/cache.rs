//! Content-addressed disk cache for fetched media.
//!
//! One flat directory of `<hash>.media` files, where the hash is derived
//! from the fully-resolved absolute URL. No metadata sidecars: an entry is
//! valid exactly when its file exists with size greater than zero. The
//! single most important property here is that no failure path may leave a
//! zero-byte or partially-written file behind, because such a file would
//! shadow every future fetch of the same URL.
//!
//! The cache never evicts; bounding its growth is an explicit non-goal of
//! this subsystem.

use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extension for every cache entry.
const ENTRY_EXTENSION: &str = "media";

/// A cache write that could not produce a valid entry.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The payload was empty. Zero-byte entries are indistinguishable from
    /// corrupt ones, so they are refused up front.
    #[error("refusing to cache an empty payload for '{url}'")]
    EmptyPayload {
        /// The resolved URL whose payload was empty.
        url: String,
    },

    /// The cache directory could not be created.
    #[error("failed to create cache directory '{}': {source}", dir.display())]
    CreateDir {
        /// The directory that could not be created.
        dir: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The entry file could not be written. Any partial file has already
    /// been removed by the time this error is returned.
    #[error("failed to write cache entry '{}': {source}", path.display())]
    Write {
        /// The entry path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Content-addressed store of fetched media, scoped to one directory.
///
/// The directory is an explicit constructor argument rather than ambient
/// process state, so embedders control where cache files land and two
/// pipelines can coexist without sharing entries.
pub struct ResourceCache {
    dir: PathBuf,
}

impl ResourceCache {
    /// Create a cache rooted at `dir`. The directory itself is created
    /// lazily on the first store.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ResourceCache { dir: dir.into() }
    }

    /// The directory this cache writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Look up the entry for `absolute_url`.
    ///
    /// Returns a hit only if the entry file exists AND its size is
    /// strictly greater than zero; a zero-byte file (a crashed earlier
    /// write, a disk-full artifact) is a miss, never a hit.
    #[must_use]
    pub fn lookup(&self, absolute_url: &str) -> Option<PathBuf> {
        let path = self.entry_path(absolute_url);
        let metadata = fs::metadata(&path).ok()?;
        (metadata.is_file() && metadata.len() > 0).then_some(path)
    }

    /// Write `bytes` as the entry for `absolute_url` and return the entry
    /// path.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty payload, an uncreatable cache
    /// directory, or a failed write. On a failed write the partial file is
    /// deleted first, so the entry is either fully present or fully
    /// absent.
    pub fn store(&self, absolute_url: &str, bytes: &[u8]) -> Result<PathBuf, CacheError> {
        if bytes.is_empty() {
            return Err(CacheError::EmptyPayload {
                url: absolute_url.to_string(),
            });
        }

        fs::create_dir_all(&self.dir).map_err(|source| CacheError::CreateDir {
            dir: self.dir.clone(),
            source,
        })?;

        let path = self.entry_path(absolute_url);
        if let Err(source) = fs::write(&path, bytes) {
            // A half-written file must not survive to wedge later lookups.
            let _ = fs::remove_file(&path);
            return Err(CacheError::Write { path, source });
        }
        Ok(path)
    }

    /// Path of the entry for `absolute_url`, whether or not it exists.
    fn entry_path(&self, absolute_url: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{ENTRY_EXTENSION}", cache_key(absolute_url)))
    }
}

/// Derive the cache key for an absolute URL: the first 8 bytes of its
/// SHA-256 digest, hex-encoded.
///
/// The only contract is determinism - the same URL always maps to the same
/// key. SHA-256 also gives cross-run stability, but callers must not rely
/// on that.
fn cache_key(absolute_url: &str) -> String {
    let digest = Sha256::digest(absolute_url.as_bytes());
    let mut key = String::with_capacity(16);
    for byte in &digest[..8] {
        let _ = write!(key, "{byte:02x}");
    }
    key
}

#[cfg(test)]
mod tests {
    use super::cache_key;

    #[test]
    fn keys_are_deterministic() {
        let url = "https://example.com/a.jpg";
        assert_eq!(cache_key(url), cache_key(url));
    }

    #[test]
    fn distinct_urls_get_distinct_keys() {
        assert_ne!(
            cache_key("https://example.com/a.jpg"),
            cache_key("https://example.com/b.jpg")
        );
    }

    #[test]
    fn keys_are_sixteen_hex_chars() {
        let key = cache_key("https://example.com/a.jpg");
        assert_eq!(key.len(), 16);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
