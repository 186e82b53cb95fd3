//! The fetch → parse → resolve-media pipeline.
//!
//! One page load is sequential and synchronous: the document is fetched,
//! parsed with the configured strategy, and then every Image child of the
//! root gets its `src` resolved against the page URL and fetched through
//! the cache. By the time the tree leaves [`PageLoader::load_page`], each
//! `src` is either a local cache path or the untouched remote URL of a
//! failed fetch (the renderer shows a placeholder and may retry later).

use quickdom_common::warning::{clear_warnings, warn_once};
use quickdom_dom::{DocumentTree, NodeId, NodeKind};
use quickdom_html::{DocumentParser, default_parser};
use quickdom_net::{FetchError, Fetcher, FetcherConfig};
use std::path::PathBuf;

/// The fetch operations the pipeline needs from its transport.
///
/// [`Fetcher`] is the production implementation; tests substitute a stub
/// so page loads run without a network.
pub trait PageFetcher {
    /// Fetch a document body as text.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on any transport or status failure; the
    /// pipeline degrades to an empty document.
    fn fetch_text(&self, url: &str) -> Result<String, FetchError>;

    /// Resolve `reference` against `base_url` and return a local path for
    /// the media, fetching and caching it on a miss. `None` means "no
    /// entry" for any reason.
    fn fetch_media(&self, reference: &str, base_url: &str) -> Option<PathBuf>;
}

impl PageFetcher for Fetcher {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        Fetcher::fetch_text(self, url)
    }

    fn fetch_media(&self, reference: &str, base_url: &str) -> Option<PathBuf> {
        Fetcher::fetch_media(self, reference, base_url)
    }
}

/// Loads pages: the single externally observable entry point consumed by
/// the rendering layer.
pub struct PageLoader<F: PageFetcher> {
    fetcher: F,
    parser: Box<dyn DocumentParser>,
}

impl PageLoader<Fetcher> {
    /// Build a loader with the real fetcher and the widest parser
    /// strategy available on this target.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the HTTP client cannot be constructed.
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        Ok(PageLoader::with_fetcher(
            Fetcher::new(config)?,
            default_parser(),
        ))
    }
}

impl<F: PageFetcher> PageLoader<F> {
    /// Build a loader from an explicit fetcher and parser strategy.
    pub fn with_fetcher(fetcher: F, parser: Box<dyn DocumentParser>) -> Self {
        PageLoader { fetcher, parser }
    }

    /// The parser strategy this loader runs.
    #[must_use]
    pub fn parser_name(&self) -> &'static str {
        self.parser.name()
    }

    /// Load and parse the page at `url`, resolving its media.
    ///
    /// Never fails: a failed document fetch yields an empty page (a tree
    /// holding only the root), and a failed media fetch leaves that
    /// image's remote `src` in place.
    pub fn load_page(&self, url: &str) -> DocumentTree {
        // Stale warnings from the previous page would suppress this one's.
        clear_warnings();

        let html = match self.fetcher.fetch_text(url) {
            Ok(html) => html,
            Err(error) => {
                warn_once("browser", &format!("document fetch failed: {error}"));
                String::new()
            }
        };

        self.load_page_body(&html, url)
    }

    /// Parse an already-fetched document body and resolve its media
    /// against `base_url`.
    ///
    /// The same pipeline as [`PageLoader::load_page`] minus the document
    /// fetch; useful when the body came from disk.
    #[must_use]
    pub fn load_page_body(&self, html: &str, base_url: &str) -> DocumentTree {
        let mut tree = self.parser.parse(html.as_bytes());
        self.resolve_media(&mut tree, base_url);
        tree
    }

    /// Rewrite every root-level Image `src` that can be fetched into a
    /// local cache path.
    fn resolve_media(&self, tree: &mut DocumentTree, base_url: &str) {
        let images: Vec<NodeId> = tree.root_children_of_kind(NodeKind::Image).collect();

        for id in images {
            let Some(src) = tree.attribute(id, "src") else {
                continue;
            };
            if src.is_empty() {
                continue;
            }
            let src = src.to_string();

            if let Some(path) = self.fetcher.fetch_media(&src, base_url)
                && let Some(node) = tree.get_mut(id)
            {
                let _ = node
                    .attributes
                    .insert("src".to_string(), path.to_string_lossy().into_owned());
            }
        }
    }
}
