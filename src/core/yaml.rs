//! YAML decoding and value classification
//!
//! Decoding is delegated to `serde_yaml`. On top of it the decoder rejects
//! tags the YAML core schema does not resolve, unless custom tags are
//! explicitly allowed.

use crate::core::tags;
use serde::Deserialize;
use serde_yaml::Value;
use std::fmt;

/// Options for decoding a front matter block
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Keep application tags such as `!include` as tagged values instead of failing
    pub allow_custom_tags: bool,
}

/// A decode failure carrying the collaborator's message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    message: String,
}

impl DecodeError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DecodeError {}

/// Decode a YAML document into a value
pub fn decode(text: &str, options: &DecodeOptions) -> Result<Value, DecodeError> {
    let value: Value = serde_yaml::from_str(text).map_err(|e| DecodeError::new(e.to_string()))?;
    if !options.allow_custom_tags {
        if let Some(message) = tags::find_unknown_tag(text) {
            return Err(DecodeError::new(message));
        }
        reject_tags(&value)?;
    }
    Ok(value)
}

fn reject_tags(value: &Value) -> Result<(), DecodeError> {
    match value {
        Value::Tagged(tagged) => Err(DecodeError::new(format!("unknown tag {}", tagged.tag))),
        Value::Sequence(seq) => seq.iter().try_for_each(reject_tags),
        Value::Mapping(map) => map.iter().try_for_each(|(k, v)| {
            reject_tags(k)?;
            reject_tags(v)
        }),
        _ => Ok(()),
    }
}

/// Name the runtime type of a value, as used in type mismatch messages
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}

/// Check whether a value counts as an object for serialization
///
/// Sequences pass as well as mappings; only null and plain scalars are refused.
pub fn is_object(value: &Value) -> bool {
    matches!(
        value,
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_)
    )
}
