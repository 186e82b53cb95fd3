//! HTML tokenizer and tree builder for the QuickDOM mini browser.
//!
//! # Scope
//!
//! This crate converts a raw document byte buffer into a
//! [`quickdom_dom::DocumentTree`], recognizing a fixed structural vocabulary
//! (`p`, `img`, `a`, `h1`, `h2`, `div`, `span`) and tolerating malformed or
//! truncated markup without ever failing.
//!
//! Three interchangeable execution strategies implement one
//! [`DocumentParser`] capability:
//!
//! - [`ScalarParser`] - byte-by-byte reference implementation
//! - `Sse2Parser` (x86_64) - 16-byte vector compare-and-mask scan for `<`
//! - `NeonParser` (aarch64) - the same wide scan on NEON
//!
//! The vectorized variants only accelerate locating tag-start bytes; all
//! per-tag logic is shared, so every strategy produces an identical tree
//! for the same input. Any divergence is a defect, and the equivalence
//! tests in `tests/equivalence_tests.rs` enforce this.
//!
//! # Not Implemented
//!
//! Deliberately outside this simplified grammar:
//!
//! - Nesting (every recognized tag becomes a direct child of the root)
//! - Character reference decoding
//! - Comments, DOCTYPE, CDATA (their markers are plain noise to the scanner)
//! - Any tag outside the recognized vocabulary (skipped, not preserved)

pub mod parser;

pub use parser::{DocumentParser, ScalarParser, available_parsers, default_parser, parser_by_name};

#[cfg(target_arch = "aarch64")]
pub use parser::NeonParser;
#[cfg(target_arch = "x86_64")]
pub use parser::Sse2Parser;
