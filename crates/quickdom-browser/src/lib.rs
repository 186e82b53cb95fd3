//! High-level page loading API for the QuickDOM mini browser.
//!
//! # Scope
//!
//! This crate is the composition point the (out-of-tree) rendering shell
//! consumes: fetch a document, parse it, resolve and cache the media it
//! references, and hand back one tree with every successfully fetched
//! Image `src` rewritten to a local cache path.
//!
//! # Not Implemented
//!
//! - Layout, styling, painting (the shell's problem)
//! - Tab management and freeze-to-disk snapshots
//! - Timeouts beyond the fetcher's own; callers own deadline policy

pub mod pipeline;

pub use pipeline::{PageFetcher, PageLoader};

pub use quickdom_dom as dom;
pub use quickdom_html as html;
pub use quickdom_net as net;
