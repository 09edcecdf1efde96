//! Delimiter grammar for front matter blocks
//!
//! A document matches when it starts with a `---` line, followed by a
//! non-empty YAML block, a line break and a closing `---`. Line breaks after
//! the closing delimiter are dropped and the remainder is the content.
//!
//! The pattern is evaluated by the `regex` crate, which never backtracks, so
//! matching stays linear in the input length even for adversarial documents.

use log::trace;
use regex::Regex;
use std::sync::LazyLock;

static FRONT_MATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[\r\n]+(.+?)[\r\n]+---[\r\n]*(.*)\z")
        .expect("front matter pattern is valid")
});

/// The two halves of a matched document, borrowed from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// Raw YAML between the delimiters
    pub yaml: &'a str,
    /// Everything after the closing delimiter and its line breaks
    pub content: &'a str,
}

/// Split a document into its front matter block and content
///
/// Returns `None` when the document does not match the grammar.
pub fn split(text: &str) -> Option<Split<'_>> {
    let Some(caps) = FRONT_MATTER.captures(text) else {
        trace!("no front matter delimiters in {} bytes of input", text.len());
        return None;
    };

    let yaml = caps.get(1).map_or("", |m| m.as_str());
    let content = caps.get(2).map_or("", |m| m.as_str());
    Some(Split { yaml, content })
}

/// Check whether a document matches the grammar without decoding anything
pub fn is_match(text: &str) -> bool {
    FRONT_MATTER.is_match(text)
}
