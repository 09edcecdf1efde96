//! Tag resolution check for raw YAML text
//!
//! `serde_yaml` keeps local tags (`!foo`) as tagged values but quietly turns
//! unknown secondary tags (`!!foo`) into plain scalars. This check replays the
//! block through the `yaml-rust2` event parser and rejects any node tagged
//! `!!name` or `!<tag:yaml.org,2002:name>` outside the core schema.

use log::trace;
use yaml_rust2::parser::{Event, EventReceiver, Parser, Tag};

const CORE_PREFIX: &str = "tag:yaml.org,2002:";

const CORE_TAGS: &[&str] = &[
    "null",
    "bool",
    "int",
    "float",
    "timestamp",
    "merge",
    "binary",
    "omap",
    "pairs",
    "set",
    "str",
    "seq",
    "map",
];

/// Collects the first unresolved tag from the event stream
#[derive(Default)]
struct TagCheck {
    unknown: Option<String>,
}

impl EventReceiver for TagCheck {
    fn on_event(&mut self, event: Event) {
        if self.unknown.is_some() {
            return;
        }
        match event {
            Event::Scalar(.., Some(tag))
            | Event::SequenceStart(.., Some(tag))
            | Event::MappingStart(.., Some(tag)) => self.unknown = check_tag(&tag),
            _ => {}
        }
    }
}

/// Find the first tag in `text` that the core schema does not resolve
///
/// Returns the error message for it, or `None` when every tag resolves.
/// Syntax errors are left to the decoder; tags seen before one still count.
pub fn find_unknown_tag(text: &str) -> Option<String> {
    let mut check = TagCheck::default();
    let mut parser = Parser::new(text.chars());
    if let Err(e) = parser.load(&mut check, false) {
        trace!("tag check stopped at a syntax error: {}", e);
    }
    check.unknown
}

fn check_tag(tag: &Tag) -> Option<String> {
    let name = match tag.handle.as_str() {
        "!!" | CORE_PREFIX => tag.suffix.as_str(),
        "" => tag.suffix.strip_prefix(CORE_PREFIX)?,
        _ => return None,
    };

    if CORE_TAGS.contains(&name) {
        None
    } else {
        Some(format!("unknown tag !<{CORE_PREFIX}{name}>"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_secondary_tag() {
        let message = find_unknown_tag("published: true\ninvalid_yaml: !!someinvalid").unwrap();
        assert_eq!(message, "unknown tag !<tag:yaml.org,2002:someinvalid>");
    }

    #[test]
    fn test_core_tags_pass() {
        assert_eq!(find_unknown_tag("a: !!str 1\nb: !!int \"2\"\nc: !!map {}"), None);
        assert_eq!(find_unknown_tag("- !!binary |\n  R0lG"), None);
    }

    #[test]
    fn test_verbatim_tags() {
        assert!(find_unknown_tag("a: !<tag:yaml.org,2002:nope> x").is_some());
        assert_eq!(find_unknown_tag("a: !<tag:yaml.org,2002:str> x"), None);
        assert_eq!(find_unknown_tag("a: !<tag:example.com,2000:x> y"), None);
    }

    #[test]
    fn test_local_tags_are_left_alone() {
        assert_eq!(find_unknown_tag("path: !include other.yml"), None);
    }

    #[test]
    fn test_bangs_inside_scalars_are_not_tags() {
        assert_eq!(find_unknown_tag("title: Hello !!world"), None);
        assert_eq!(find_unknown_tag("title: 'it''s !!quoted'"), None);
        assert_eq!(find_unknown_tag("title: \"say \\\" !!x\""), None);
        assert_eq!(find_unknown_tag("title: x # !!comment"), None);
    }

    #[test]
    fn test_multi_line_quoted_scalar() {
        assert_eq!(find_unknown_tag("a: \"first\n  !!still quoted\"\nb: 1"), None);
        assert!(find_unknown_tag("a: \"first\n  line\"\nb: !!bad 1").is_some());
    }

    #[test]
    fn test_block_scalar_body_is_skipped() {
        assert_eq!(find_unknown_tag("body: |\n  !!not a tag\n  more\nnext: 1"), None);
        assert!(find_unknown_tag("body: >\n  text\nnext: !!bad 1").is_some());
    }

    #[test]
    fn test_flow_collections() {
        assert!(find_unknown_tag("a: [1, !!bad 2]").is_some());
        assert!(find_unknown_tag("a: {k: !!bad v}").is_some());
        assert_eq!(find_unknown_tag("a: [!!str 1, !!int 2]"), None);
    }

    #[test]
    fn test_plain_scalar_continuation_is_not_a_tag() {
        assert_eq!(find_unknown_tag("title: foo\n  !!bar"), None);
        assert_eq!(find_unknown_tag("- first\n  !!second\n- !!str third"), None);
    }

    #[test]
    fn test_tags_on_collections() {
        assert!(find_unknown_tag("a: !!bad\n  k: v").is_some());
        assert!(find_unknown_tag("a: !!bad\n  - x").is_some());
        assert_eq!(find_unknown_tag("a: !!set\n  ? x"), None);
    }

    #[test]
    fn test_sequence_entries_and_anchors() {
        assert!(find_unknown_tag("- !!bad x").is_some());
        assert!(find_unknown_tag("a: &anchor !!bad x").is_some());
        assert_eq!(find_unknown_tag("a: &anchor !!str x"), None);
    }
}
