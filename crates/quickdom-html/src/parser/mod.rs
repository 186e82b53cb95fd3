//! Parser strategies and strategy selection.
//!
//! One capability, several implementations: [`DocumentParser::parse`] turns
//! bytes into a tree, and the only difference between strategies is how fast
//! they locate the next `U+003C LESS-THAN SIGN` in the buffer. The shared
//! per-tag state machine lives in [`builder`]; the `<`-locator strategies
//! live in [`scan`].

mod builder;
mod scan;

use quickdom_dom::DocumentTree;

use builder::TreeBuilder;
use scan::ScalarScan;
#[cfg(target_arch = "aarch64")]
use scan::NeonScan;
#[cfg(target_arch = "x86_64")]
use scan::Sse2Scan;

/// An interchangeable parsing strategy.
///
/// Implementations must be observably identical: for every input buffer,
/// every strategy produces the same tree (same kinds, same text, same
/// attributes, same child order). Parsing is total - malformed or truncated
/// input yields a partial tree, never an error.
pub trait DocumentParser {
    /// Strategy name (for diagnostics and CLI selection).
    fn name(&self) -> &'static str;

    /// Parse `input` into a document tree.
    ///
    /// Empty input yields a tree holding only the root node.
    fn parse(&self, input: &[u8]) -> DocumentTree;
}

/// Byte-by-byte reference strategy. Available on every target.
pub struct ScalarParser;

impl DocumentParser for ScalarParser {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn parse(&self, input: &[u8]) -> DocumentTree {
        TreeBuilder::new(input, ScalarScan).run()
    }
}

/// Wide-scan strategy using SSE2 16-byte compare-and-mask to locate `<`.
///
/// SSE2 is part of the x86_64 baseline, so no runtime feature probe is
/// needed on this target.
#[cfg(target_arch = "x86_64")]
pub struct Sse2Parser;

#[cfg(target_arch = "x86_64")]
impl DocumentParser for Sse2Parser {
    fn name(&self) -> &'static str {
        "sse2"
    }

    fn parse(&self, input: &[u8]) -> DocumentTree {
        TreeBuilder::new(input, Sse2Scan).run()
    }
}

/// Wide-scan strategy using NEON 16-byte compare to locate `<`.
///
/// NEON is mandatory on aarch64, so no runtime feature probe is needed on
/// this target.
#[cfg(target_arch = "aarch64")]
pub struct NeonParser;

#[cfg(target_arch = "aarch64")]
impl DocumentParser for NeonParser {
    fn name(&self) -> &'static str {
        "neon"
    }

    fn parse(&self, input: &[u8]) -> DocumentTree {
        TreeBuilder::new(input, NeonScan).run()
    }
}

/// Pick the widest strategy available for the compilation target.
#[must_use]
pub fn default_parser() -> Box<dyn DocumentParser> {
    #[cfg(target_arch = "x86_64")]
    {
        Box::new(Sse2Parser)
    }
    #[cfg(target_arch = "aarch64")]
    {
        Box::new(NeonParser)
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        Box::new(ScalarParser)
    }
}

/// Every strategy compiled into this build, scalar first.
///
/// The equivalence tests iterate this list and compare each strategy's
/// output against the scalar baseline.
#[must_use]
pub fn available_parsers() -> Vec<Box<dyn DocumentParser>> {
    let mut parsers: Vec<Box<dyn DocumentParser>> = vec![Box::new(ScalarParser)];
    #[cfg(target_arch = "x86_64")]
    parsers.push(Box::new(Sse2Parser));
    #[cfg(target_arch = "aarch64")]
    parsers.push(Box::new(NeonParser));
    parsers
}

/// Look up a strategy by its [`DocumentParser::name`].
///
/// Returns `None` for names that are unknown or not compiled into this
/// build (e.g. `"neon"` on x86_64).
#[must_use]
pub fn parser_by_name(name: &str) -> Option<Box<dyn DocumentParser>> {
    available_parsers().into_iter().find(|p| p.name() == name)
}
