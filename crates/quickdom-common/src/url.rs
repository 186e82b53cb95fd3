//! URL resolution utilities.
//!
//! [§ 4.2.3 The base element](https://html.spec.whatwg.org/multipage/semantics.html#the-base-element)
//! [URL Standard](https://url.spec.whatwg.org/)

/// Resolve a potentially relative reference against a base URL.
///
/// # Algorithm
///
/// [§ 2.5 URLs](https://html.spec.whatwg.org/multipage/urls-and-fetching.html#resolving-urls)
///
/// Rules are checked in priority order:
///
/// 1. An empty reference resolves to the empty string; callers treat that
///    as "nothing to fetch".
/// 2. A reference that already carries an `http://` or `https://` scheme is
///    returned unchanged.
/// 3. A protocol-relative reference (`//host/path`) is given the `https:`
///    scheme.
/// 4. A root-relative reference (`/path`) is appended to the scheme and
///    authority of `base` (everything before the first `/` after the
///    authority).
/// 5. Anything else is path-relative: `base` is given a trailing `/` if it
///    lacks one, and the reference is concatenated.
///
/// NOTE: This is deliberately not the URL Standard's full parsing
/// algorithm. `.`/`..` segments, percent-encoding, and query strings pass
/// through untouched so that resolved strings stay byte-for-byte
/// predictable from their inputs.
#[must_use]
pub fn resolve_url(reference: &str, base: &str) -> String {
    // Rule 1: nothing to resolve.
    if reference.is_empty() {
        return String::new();
    }

    // Rule 2: already absolute.
    //
    // [URL Standard § 4.3](https://url.spec.whatwg.org/#url-parsing)
    // "An absolute-URL string is a URL-scheme string, followed by U+003A (:),
    // followed by a scheme-specific part."
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return reference.to_string();
    }

    // Rule 3: protocol-relative.
    if reference.starts_with("//") {
        return format!("https:{reference}");
    }

    // Rule 4: root-relative - join with the scheme+authority of the base.
    if reference.starts_with('/') {
        return format!("{}{reference}", scheme_and_authority(base));
    }

    // Rule 5: path-relative - join with the base, inserting a slash if the
    // base does not already end in one.
    if base.ends_with('/') {
        format!("{base}{reference}")
    } else {
        format!("{base}/{reference}")
    }
}

/// Extract the scheme and authority of `base`: everything up to (but not
/// including) the first `/` after the authority.
///
/// A base with no path (`https://example.com`) is returned whole; a base
/// with no `://` at all is also returned whole, which keeps resolution
/// total on malformed input.
fn scheme_and_authority(base: &str) -> &str {
    let Some(scheme_end) = base.find("://") else {
        return base;
    };
    let after_scheme = &base[scheme_end + 3..];
    after_scheme
        .find('/')
        .map_or(base, |path_start| &base[..scheme_end + 3 + path_start])
}

#[cfg(test)]
mod tests {
    use super::resolve_url;

    #[test]
    fn absolute_references_pass_through() {
        let url = "https://example.com/image.jpg";
        assert_eq!(resolve_url(url, "https://example.com/page.html"), url);
        let url = "http://other.example/a/b.png";
        assert_eq!(resolve_url(url, "https://example.com/"), url);
    }

    #[test]
    fn path_relative_joins_with_base() {
        assert_eq!(
            resolve_url("image.jpg", "https://example.com/page/"),
            "https://example.com/page/image.jpg"
        );
    }

    #[test]
    fn path_relative_inserts_missing_slash() {
        assert_eq!(
            resolve_url("image.jpg", "https://example.com/page"),
            "https://example.com/page/image.jpg"
        );
    }

    #[test]
    fn root_relative_joins_with_authority() {
        assert_eq!(
            resolve_url("/image.jpg", "https://example.com/page/subpage/"),
            "https://example.com/image.jpg"
        );
    }

    #[test]
    fn root_relative_with_pathless_base() {
        assert_eq!(
            resolve_url("/image.jpg", "https://example.com"),
            "https://example.com/image.jpg"
        );
    }

    #[test]
    fn protocol_relative_gets_https() {
        assert_eq!(
            resolve_url("//example.com/image.jpg", "https://example.com/page/"),
            "https://example.com/image.jpg"
        );
    }

    #[test]
    fn empty_reference_resolves_to_empty() {
        assert_eq!(resolve_url("", "https://example.com/"), "");
    }

    #[test]
    fn dot_segments_are_not_normalized() {
        assert_eq!(
            resolve_url("../up.png", "https://example.com/a/b/"),
            "https://example.com/a/b/../up.png"
        );
    }

    #[test]
    fn malformed_base_stays_total() {
        assert_eq!(resolve_url("/x.png", "not a url"), "not a url/x.png");
    }
}
