//! Resource cache and fetcher for the QuickDOM document core.
//!
//! # Scope
//!
//! This crate provides:
//! - **Resource Cache** - a content-addressed disk store for fetched media,
//!   keyed by a hash of the fully-resolved URL
//! - **Fetcher** - blocking HTTP(S) retrieval of text documents and binary
//!   media, writing media through the cache
//!
//! Every failure here is recoverable: transport errors, bad statuses, and
//! cache-write failures degrade to "no entry" results, never panics, and
//! never a corrupt cache file left on disk.

pub mod cache;
pub mod fetch;

pub use cache::{CacheError, ResourceCache};
pub use fetch::{FetchError, Fetcher, FetcherConfig};
