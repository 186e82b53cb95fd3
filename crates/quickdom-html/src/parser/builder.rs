//! The shared per-tag state machine.
//!
//! Every parsing strategy drives this one builder; strategies differ only
//! in the [`TagScanner`] that locates `<` bytes. The machine is a heavily
//! simplified cousin of [WHATWG § 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
//! it recognizes a closed tag vocabulary, attaches every recognized tag as
//! a direct child of the root (no nesting stack, no stack of open
//! elements), treats closing tags as discardable noise, and keeps whatever
//! partial content it has accumulated when the input is truncated.
//! Parsing never fails; malformed input only yields a partial tree.

use quickdom_dom::{DocumentTree, NodeId, NodeKind};
use strum_macros::Display;

use super::scan::TagScanner;

/// The builder state machine. One variant per phase of tag handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
enum BuilderState {
    /// Looking for the next `<`. Plain characters outside any recognized
    /// tag are discarded at the root level.
    Scanning,
    /// Saw `</`; consume through the next `>` and resume scanning. The
    /// flat tree model has no nesting stack, so closing tags carry no
    /// structure.
    SkipClosingTag,
    /// Saw `<` followed by a letter; accumulate the (lowercased) tag name.
    ReadTagName,
    /// The tag name is not in the recognized vocabulary; consume through
    /// the next `>`. Content inside unknown tags is invisible to the tree.
    SkipUnknownTag,
    /// Inside a recognized tag: read `key="value"` pairs until `>`.
    ReadAttributes,
    /// After a text-bearing tag's `>`: capture raw characters up to (not
    /// including) the next `<`.
    ReadText,
    /// End of input reached; the tree is complete.
    Done,
}

/// Builds a [`DocumentTree`] from a byte buffer, one recognized tag at a
/// time.
pub(crate) struct TreeBuilder<'i, S: TagScanner> {
    input: &'i [u8],
    pos: usize,
    state: BuilderState,
    scanner: S,
    tree: DocumentTree,
    /// Node under construction, allocated when a tag name is recognized
    /// and appended to the root when the tag (and its text, if any) ends.
    current_node: Option<NodeId>,
    /// Kind of the node under construction.
    current_kind: Option<NodeKind>,
}

impl<'i, S: TagScanner> TreeBuilder<'i, S> {
    /// Create a builder over `input` using `scanner` to locate `<` bytes.
    pub(crate) fn new(input: &'i [u8], scanner: S) -> Self {
        TreeBuilder {
            input,
            pos: 0,
            state: BuilderState::Scanning,
            scanner,
            tree: DocumentTree::new(),
            current_node: None,
            current_kind: None,
        }
    }

    /// Run the machine to completion and return the tree.
    pub(crate) fn run(mut self) -> DocumentTree {
        while self.state != BuilderState::Done {
            match self.state {
                BuilderState::Scanning => self.handle_scanning(),
                BuilderState::SkipClosingTag | BuilderState::SkipUnknownTag => {
                    self.handle_skip_through_tag_close();
                }
                BuilderState::ReadTagName => self.handle_read_tag_name(),
                BuilderState::ReadAttributes => self.handle_read_attributes(),
                BuilderState::ReadText => self.handle_read_text(),
                BuilderState::Done => {}
            }
        }
        self.tree
    }

    /// Scanning: jump to the next `<` and classify what follows it.
    fn handle_scanning(&mut self) {
        let Some(open) = self.scanner.find_tag_open(self.input, self.pos) else {
            self.state = BuilderState::Done;
            return;
        };
        self.pos = open + 1;

        match self.input.get(self.pos) {
            // Truncated right after `<`: nothing left to read.
            None => self.state = BuilderState::Done,
            Some(b'/') => {
                self.pos += 1;
                self.state = BuilderState::SkipClosingTag;
            }
            Some(b) if b.is_ascii_alphabetic() => self.state = BuilderState::ReadTagName,
            // `<` followed by anything else (`<!`, `< `, `<3`) is not a
            // tag start; discard the `<` and keep scanning from the next
            // byte, so e.g. comment contents remain visible to the scanner.
            Some(_) => {}
        }
    }

    /// SkipClosingTag / SkipUnknownTag: consume through the next `>` (or
    /// end of buffer) and return to scanning.
    fn handle_skip_through_tag_close(&mut self) {
        match find_byte(self.input, self.pos, b'>') {
            Some(close) => {
                self.pos = close + 1;
                self.state = BuilderState::Scanning;
            }
            None => {
                self.pos = self.input.len();
                self.state = BuilderState::Done;
            }
        }
    }

    /// ReadTagName: accumulate lowercased ASCII alphanumerics (`h1`/`h2`
    /// carry a digit) and map the name onto the recognized vocabulary.
    fn handle_read_tag_name(&mut self) {
        let start = self.pos;
        while let Some(&b) = self.input.get(self.pos) {
            if b.is_ascii_alphanumeric() {
                self.pos += 1;
            } else {
                break;
            }
        }
        let name = self.input[start..self.pos].to_ascii_lowercase();

        match recognized_kind(&name) {
            Some(kind) => {
                let id = self.tree.alloc(kind);
                self.current_node = Some(id);
                self.current_kind = Some(kind);
                self.state = BuilderState::ReadAttributes;
            }
            None => self.state = BuilderState::SkipUnknownTag,
        }
    }

    /// ReadAttributes: `key="value"` pairs until `>`. Keys with no `=` and
    /// empty keys are dropped silently. Truncation keeps whatever pairs
    /// were complete.
    fn handle_read_attributes(&mut self) {
        loop {
            self.skip_whitespace();
            match self.input.get(self.pos) {
                None => {
                    // Truncated inside the tag: keep the node with the
                    // attributes read so far.
                    self.finish_current_node();
                    self.state = BuilderState::Done;
                    return;
                }
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => self.read_one_attribute(),
            }
        }

        // Past the `>`: images carry no text, everything else captures the
        // following raw character run.
        if self.current_kind == Some(NodeKind::Image) {
            self.finish_current_node();
            self.state = BuilderState::Scanning;
        } else {
            self.state = BuilderState::ReadText;
        }
    }

    /// ReadText: capture raw characters up to (not including) the next `<`.
    ///
    /// No entity decoding and no nested-tag stripping; capture stops
    /// exactly at the next `<`, whatever it introduces.
    fn handle_read_text(&mut self) {
        let start = self.pos;
        let (end, next_state) = match self.scanner.find_tag_open(self.input, self.pos) {
            Some(open) => (open, BuilderState::Scanning),
            None => (self.input.len(), BuilderState::Done),
        };
        self.pos = end;

        let text = String::from_utf8_lossy(&self.input[start..end]).into_owned();
        if let Some(id) = self.current_node
            && let Some(node) = self.tree.get_mut(id)
        {
            node.text = text;
        }
        self.finish_current_node();
        self.state = next_state;
    }

    /// Read one `key[="value"]` pair, or drop a bare key.
    fn read_one_attribute(&mut self) {
        let key_start = self.pos;
        while let Some(&b) = self.input.get(self.pos) {
            if b == b'=' || b == b'>' || b.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
        let key = self.input[key_start..self.pos].to_ascii_lowercase();

        // A key not immediately followed by `=` has no value and is
        // dropped (this also swallows the `/` of self-closing syntax).
        if self.input.get(self.pos) != Some(&b'=') {
            return;
        }
        self.pos += 1;

        let value = self.read_attribute_value();
        if key.is_empty() {
            return;
        }
        let key = String::from_utf8_lossy(&key).into_owned();
        if let Some(id) = self.current_node
            && let Some(node) = self.tree.get_mut(id)
        {
            let _ = node.attributes.insert(key, value);
        }
    }

    /// Read a `"`-quoted value (through the closing quote, or to end of
    /// buffer when truncated) or an unquoted value (up to whitespace or
    /// `>`, which stay unconsumed).
    fn read_attribute_value(&mut self) -> String {
        let raw = if self.input.get(self.pos) == Some(&b'"') {
            self.pos += 1;
            let start = self.pos;
            match find_byte(self.input, self.pos, b'"') {
                Some(quote) => {
                    self.pos = quote + 1;
                    &self.input[start..quote]
                }
                None => {
                    self.pos = self.input.len();
                    &self.input[start..]
                }
            }
        } else {
            let start = self.pos;
            while let Some(&b) = self.input.get(self.pos) {
                if b == b'>' || b.is_ascii_whitespace() {
                    break;
                }
                self.pos += 1;
            }
            &self.input[start..self.pos]
        };
        String::from_utf8_lossy(raw).into_owned()
    }

    /// Append the node under construction to the root and clear it.
    fn finish_current_node(&mut self) {
        if let Some(id) = self.current_node.take() {
            self.tree.append_child(NodeId::ROOT, id);
        }
        self.current_kind = None;
    }

    fn skip_whitespace(&mut self) {
        while let Some(&b) = self.input.get(self.pos) {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }
}

/// Map a lowercased tag name onto the recognized vocabulary.
///
/// `h1` and `h2` share [`NodeKind::Heading`]; everything else outside the
/// vocabulary is skipped by the caller.
fn recognized_kind(name: &[u8]) -> Option<NodeKind> {
    match name {
        b"p" => Some(NodeKind::Paragraph),
        b"img" => Some(NodeKind::Image),
        b"a" => Some(NodeKind::Link),
        b"h1" | b"h2" => Some(NodeKind::Heading),
        b"div" => Some(NodeKind::Division),
        b"span" => Some(NodeKind::Span),
        _ => None,
    }
}

/// Position of the first `needle` at or after `from`.
fn find_byte(input: &[u8], from: usize, needle: u8) -> Option<usize> {
    input
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|offset| from + offset)
}
