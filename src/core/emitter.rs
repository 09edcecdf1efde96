//! YAML encoding with configurable layout
//!
//! Collections are laid out by this module; single scalars are rendered by
//! `serde_yaml`, which decides when a string needs quoting. Sequences nested
//! under a mapping key are indented by default.

use serde::Deserialize;
use serde_yaml::Value;
use std::fmt;

/// Encoding knobs, forwarded unchanged from [`serialize`](crate::serialize)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Spaces per nesting level (1 to 9)
    pub indent: usize,
    /// Do not indent sequences nested under a mapping key
    pub no_array_indent: bool,
    /// Nesting depth from which collections are written in flow style
    /// (`{a: 1}`, `[x, y]`); `None` keeps block style everywhere
    pub flow_level: Option<usize>,
    /// Sort mapping keys instead of keeping insertion order
    pub sort_keys: bool,
    /// Drop entries that cannot be encoded instead of failing
    pub skip_invalid: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            no_array_indent: false,
            flow_level: None,
            sort_keys: false,
            skip_invalid: false,
        }
    }
}

/// An encode failure carrying a human-readable message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeError {
    message: String,
}

impl EncodeError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EncodeError {}

/// Encode a value as a YAML document, terminated by a line break
pub fn encode(value: &Value, options: &EncodeOptions) -> Result<String, EncodeError> {
    if !(1..=9).contains(&options.indent) {
        return Err(EncodeError::new(format!(
            "indent must be between 1 and 9, got {}",
            options.indent
        )));
    }

    let emitter = Emitter { options };
    let mut out = match emitter.node(value, 0)? {
        Node::Inline(text) => text,
        Node::Literal { header, lines } => {
            let mut text = header;
            for line in emitter.indented(lines, emitter.options.indent) {
                text.push('\n');
                text.push_str(&line);
            }
            text
        }
        Node::Mapping(lines) | Node::Sequence(lines) => lines.join("\n"),
    };
    out.push('\n');
    Ok(out)
}

/// A rendered value, before it is placed under its parent
enum Node {
    /// Fits after `key: ` or `- `
    Inline(String),
    /// A literal block scalar: header after the indicator, body lines below
    Literal { header: String, lines: Vec<String> },
    Mapping(Vec<String>),
    Sequence(Vec<String>),
}

struct Emitter<'a> {
    options: &'a EncodeOptions,
}

impl Emitter<'_> {
    fn node(&self, value: &Value, depth: usize) -> Result<Node, EncodeError> {
        if self.options.flow_level.is_some_and(|level| depth >= level) {
            return self.flow(value).map(Node::Inline);
        }

        match value {
            Value::Mapping(map) if map.is_empty() => Ok(Node::Inline("{}".to_string())),
            Value::Sequence(seq) if seq.is_empty() => Ok(Node::Inline("[]".to_string())),
            Value::Mapping(map) => self.block_mapping(map, depth).map(Node::Mapping),
            Value::Sequence(seq) => self.block_sequence(seq, depth).map(Node::Sequence),
            Value::String(s) if s.contains('\n') => Ok(match literal_lines(s) {
                Some(lines) => Node::Literal {
                    header: "|-".to_string(),
                    lines,
                },
                None => Node::Inline(double_quoted(s)),
            }),
            other => self.scalar(other).map(Node::Inline),
        }
    }

    fn block_mapping(
        &self,
        map: &serde_yaml::Mapping,
        depth: usize,
    ) -> Result<Vec<String>, EncodeError> {
        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map {
            let rendered = self
                .key(key)
                .and_then(|k| Ok((sort_key(key, &k), k, self.node(value, depth + 1)?)));
            match rendered {
                Ok(entry) => entries.push(entry),
                Err(_) if self.options.skip_invalid => continue,
                Err(e) => return Err(e),
            }
        }
        if self.options.sort_keys {
            entries.sort_by(|(a, ..), (b, ..)| a.cmp(b));
        }

        let indent = self.options.indent;
        let mut lines = Vec::new();
        for (_, key, node) in entries {
            match node {
                Node::Inline(text) => lines.push(format!("{key}: {text}")),
                Node::Literal { header, lines: body } => {
                    lines.push(format!("{key}: {header}"));
                    lines.extend(self.indented(body, indent));
                }
                Node::Mapping(body) => {
                    lines.push(format!("{key}:"));
                    lines.extend(self.indented(body, indent));
                }
                Node::Sequence(body) => {
                    lines.push(format!("{key}:"));
                    let width = if self.options.no_array_indent { 0 } else { indent };
                    lines.extend(self.indented(body, width));
                }
            }
        }
        Ok(lines)
    }

    fn block_sequence(&self, seq: &[Value], depth: usize) -> Result<Vec<String>, EncodeError> {
        // "- " needs two columns even when the indent is narrower.
        let width = self.options.indent.max(2);
        let marker = format!("-{}", " ".repeat(width - 1));

        let mut lines = Vec::new();
        for item in seq {
            let node = match self.node(item, depth + 1) {
                Ok(node) => node,
                Err(_) if self.options.skip_invalid => continue,
                Err(e) => return Err(e),
            };
            match node {
                Node::Inline(text) => lines.push(format!("- {text}")),
                Node::Literal { header, lines: body } => {
                    lines.push(format!("- {header}"));
                    lines.extend(self.indented(body, width));
                }
                Node::Mapping(body) | Node::Sequence(body) => {
                    let mut body = body.into_iter();
                    if let Some(first) = body.next() {
                        lines.push(format!("{marker}{first}"));
                    }
                    lines.extend(self.indented(body.collect(), width));
                }
            }
        }
        Ok(lines)
    }

    fn flow(&self, value: &Value) -> Result<String, EncodeError> {
        match value {
            Value::Mapping(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (key, value) in map {
                    let rendered = self.flow_key(key).and_then(|k| {
                        let entry = format!("{k}: {}", self.flow(value)?);
                        Ok((sort_key(key, &k), entry))
                    });
                    match rendered {
                        Ok(entry) => entries.push(entry),
                        Err(_) if self.options.skip_invalid => continue,
                        Err(e) => return Err(e),
                    }
                }
                if self.options.sort_keys {
                    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
                }
                let entries: Vec<String> = entries.into_iter().map(|(_, entry)| entry).collect();
                Ok(format!("{{{}}}", entries.join(", ")))
            }
            Value::Sequence(seq) => {
                let mut items = Vec::with_capacity(seq.len());
                for item in seq {
                    match self.flow(item) {
                        Ok(item) => items.push(item),
                        Err(_) if self.options.skip_invalid => continue,
                        Err(e) => return Err(e),
                    }
                }
                Ok(format!("[{}]", items.join(", ")))
            }
            Value::String(s) if needs_flow_quotes(s) => Ok(double_quoted(s)),
            other => self.scalar(other),
        }
    }

    fn flow_key(&self, key: &Value) -> Result<String, EncodeError> {
        match key {
            Value::String(s) if needs_flow_quotes(s) => Ok(double_quoted(s)),
            other => self.key(other),
        }
    }

    fn key(&self, key: &Value) -> Result<String, EncodeError> {
        match key {
            Value::String(s) if s.contains('\n') => Ok(double_quoted(s)),
            Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => Err(EncodeError::new(
                format!("unacceptable kind of an object to dump as a mapping key: {key:?}"),
            )),
            scalar => self.scalar(scalar),
        }
    }

    fn scalar(&self, value: &Value) -> Result<String, EncodeError> {
        match value {
            Value::Null => Ok("null".to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Number(n) => Ok(n.to_string()),
            Value::String(s) if s.contains('\n') => Ok(double_quoted(s)),
            Value::String(_) => {
                let text = serde_yaml::to_string(value).map_err(|e| EncodeError::new(e.to_string()))?;
                Ok(strip_document_markers(&text).to_string())
            }
            Value::Tagged(tagged) => match &tagged.value {
                Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => Err(EncodeError::new(
                    format!("unacceptable kind of an object to dump {}", tagged.tag),
                )),
                inner => Ok(format!("{} {}", tagged.tag, self.scalar(inner)?)),
            },
            Value::Sequence(_) | Value::Mapping(_) => self.flow(value),
        }
    }

    fn indented(&self, lines: Vec<String>, width: usize) -> Vec<String> {
        let pad = " ".repeat(width);
        lines
            .into_iter()
            .map(|line| {
                if line.is_empty() {
                    line
                } else {
                    format!("{pad}{line}")
                }
            })
            .collect()
    }
}

/// Body lines for a `|-` block, if the string can be written as one
///
/// The block must read back unchanged after the document is trimmed and
/// re-indented. Anything else is left to the double-quoted form: a final
/// line break, a line ending in whitespace, an indented first non-empty
/// line, tabs or other control characters.
fn literal_lines(s: &str) -> Option<Vec<String>> {
    if s.chars().any(|c| c.is_control() && c != '\n') {
        return None;
    }
    let lines: Vec<&str> = s.split('\n').collect();
    if lines.last().map_or(true, |line| line.is_empty()) {
        return None;
    }
    if lines.iter().any(|line| line.ends_with(' ')) {
        return None;
    }
    if lines
        .iter()
        .find(|line| !line.is_empty())
        .is_some_and(|line| line.starts_with(' '))
    {
        return None;
    }
    Some(lines.into_iter().map(str::to_string).collect())
}

/// Strings that would change structure if written plain inside `{}` or `[]`
fn needs_flow_quotes(s: &str) -> bool {
    s.contains(['\n', ',', '[', ']', '{', '}', ':', '#'])
}

/// Mapping keys sort by their text, not by the quoted form they render to
fn sort_key(key: &Value, rendered: &str) -> String {
    match key {
        Value::String(s) => s.clone(),
        _ => rendered.to_string(),
    }
}

/// A JSON string literal is a valid YAML double-quoted scalar.
fn double_quoted(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

fn strip_document_markers(text: &str) -> &str {
    let text = text.strip_prefix("--- ").unwrap_or(text);
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.strip_suffix("\n...").unwrap_or(text)
}
