//! Pipeline tests against a stub fetcher (no network involved).

use quickdom_browser::{PageFetcher, PageLoader};
use quickdom_dom::{NodeId, NodeKind};
use quickdom_html::ScalarParser;
use quickdom_net::FetchError;
use std::collections::HashMap;
use std::path::PathBuf;

/// Serves a canned document and a canned set of media resolutions.
struct StubFetcher {
    /// Document body, or `None` to simulate a transport failure.
    document: Option<String>,
    /// reference → cache path mappings that "succeed".
    media: HashMap<String, PathBuf>,
}

impl StubFetcher {
    fn with_document(html: &str) -> Self {
        StubFetcher {
            document: Some(html.to_string()),
            media: HashMap::new(),
        }
    }

    fn media_entry(mut self, reference: &str, path: &str) -> Self {
        let _ = self
            .media
            .insert(reference.to_string(), PathBuf::from(path));
        self
    }
}

impl PageFetcher for StubFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.document.clone().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        })
    }

    fn fetch_media(&self, reference: &str, _base_url: &str) -> Option<PathBuf> {
        self.media.get(reference).cloned()
    }
}

fn loader(fetcher: StubFetcher) -> PageLoader<StubFetcher> {
    PageLoader::with_fetcher(fetcher, Box::new(ScalarParser))
}

#[test]
fn test_successful_media_fetch_rewrites_src() {
    let fetcher = StubFetcher::with_document("<img src=\"a.jpg\">")
        .media_entry("a.jpg", "cache/0011223344556677.media");
    let tree = loader(fetcher).load_page("https://example.com/page/");

    let images: Vec<_> = tree.root_children_of_kind(NodeKind::Image).collect();
    assert_eq!(images.len(), 1);
    assert_eq!(
        tree.attribute(images[0], "src"),
        Some("cache/0011223344556677.media")
    );
}

#[test]
fn test_failed_media_fetch_leaves_remote_src() {
    // No media entry for b.jpg: the fetch "fails" and the remote URL
    // stays for the renderer's placeholder-and-retry path.
    let fetcher = StubFetcher::with_document("<img src=\"b.jpg\">");
    let tree = loader(fetcher).load_page("https://example.com/");

    let images: Vec<_> = tree.root_children_of_kind(NodeKind::Image).collect();
    assert_eq!(tree.attribute(images[0], "src"), Some("b.jpg"));
}

#[test]
fn test_failed_document_fetch_yields_empty_page() {
    let fetcher = StubFetcher {
        document: None,
        media: HashMap::new(),
    };
    let tree = loader(fetcher).load_page("https://example.com/missing");

    assert_eq!(tree.kind(NodeId::ROOT), Some(NodeKind::Root));
    assert!(tree.children(NodeId::ROOT).is_empty());
}

#[test]
fn test_only_images_are_rewritten() {
    let fetcher = StubFetcher::with_document(
        "<p>text</p><a href=\"a.jpg\">link</a><img src=\"a.jpg\">",
    )
    .media_entry("a.jpg", "cache/aa.media");
    let tree = loader(fetcher).load_page("https://example.com/");

    let children = tree.children(NodeId::ROOT).to_vec();
    assert_eq!(children.len(), 3);
    // The link's href is untouched even though it names the same file.
    assert_eq!(tree.attribute(children[1], "href"), Some("a.jpg"));
    assert_eq!(tree.attribute(children[2], "src"), Some("cache/aa.media"));
}

#[test]
fn test_images_without_src_are_skipped() {
    let fetcher =
        StubFetcher::with_document("<img alt=\"no source\"><img src=\"\">");
    let tree = loader(fetcher).load_page("https://example.com/");

    let images: Vec<_> = tree.root_children_of_kind(NodeKind::Image).collect();
    assert_eq!(images.len(), 2);
    assert_eq!(tree.attribute(images[0], "src"), None);
    assert_eq!(tree.attribute(images[1], "src"), Some(""));
}

#[test]
fn test_mixed_success_and_failure_across_images() {
    let fetcher = StubFetcher::with_document("<img src=\"ok.png\"><img src=\"gone.png\">")
        .media_entry("ok.png", "cache/ok.media");
    let tree = loader(fetcher).load_page("https://example.com/");

    let images: Vec<_> = tree.root_children_of_kind(NodeKind::Image).collect();
    assert_eq!(tree.attribute(images[0], "src"), Some("cache/ok.media"));
    assert_eq!(tree.attribute(images[1], "src"), Some("gone.png"));
}

/// End-to-end through the real fetcher types: a cache hit seeded on disk
/// is served to the pipeline without any network traffic.
#[test]
fn test_real_fetcher_serves_seeded_cache_entry() {
    use quickdom_net::{Fetcher, FetcherConfig};

    let dir = tempfile::tempdir().unwrap();
    let fetcher = Fetcher::new(FetcherConfig {
        cache_dir: dir.path().to_path_buf(),
        ..FetcherConfig::default()
    })
    .unwrap();

    let seeded = fetcher
        .cache()
        .store("https://no-such-host.invalid/a.jpg", b"pixels")
        .unwrap();

    let loader = PageLoader::with_fetcher(fetcher, Box::new(ScalarParser));
    // Skip the document fetch: the part under test is that the image's
    // fetch_media call is served by the seeded cache entry.
    let tree = loader.load_page_body("<img src=\"a.jpg\">", "https://no-such-host.invalid/");
    let images: Vec<_> = tree.root_children_of_kind(NodeKind::Image).collect();
    assert_eq!(
        tree.attribute(images[0], "src"),
        Some(seeded.to_string_lossy().as_ref())
    );
}
