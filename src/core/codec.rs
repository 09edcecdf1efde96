//! The front matter codec
//!
//! [`FrontMatterCodec`] converts between a text blob and a
//! [`FrontMatter`] record of decoded data plus body content.
//!
//! # Examples
//!
//! ```
//! use matter_yaml::FrontMatterCodec;
//!
//! let codec = FrontMatterCodec::new();
//! let record = codec.parse("---\ntitle: Hello\n---\nBody").unwrap();
//! assert_eq!(record.data["title"], "Hello");
//! assert_eq!(record.content, "Body");
//!
//! let text = codec.serialize(&record.data, &record.content).unwrap();
//! assert_eq!(text, "---\ntitle: Hello\n---\nBody");
//! assert!(codec.validate(&text));
//! ```

use crate::core::emitter::{self, EncodeOptions};
use crate::core::grammar;
use crate::core::yaml::{self, DecodeOptions};
use crate::error::{MatterYamlError, Result};
use log::{debug, trace};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Decoded front matter and the content that follows it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter<T = Value> {
    /// The decoded YAML block
    pub data: T,
    /// Text after the closing delimiter, verbatim; empty when there is none
    pub content: String,
}

/// Codec configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Options for decoding front matter blocks
    pub decode: DecodeOptions,
    /// Default options for encoding data
    pub encode: EncodeOptions,
}

/// Parses, serializes and validates front matter documents
///
/// The codec holds no state besides its configuration, so one instance can
/// be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct FrontMatterCodec {
    config: CodecConfig,
}

impl FrontMatterCodec {
    /// Create a codec with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with custom configuration
    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Get codec configuration
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Split a document into decoded front matter and content
    ///
    /// # Errors
    ///
    /// [`MatterYamlError::Format`] when the delimiters do not match,
    /// [`MatterYamlError::YamlParse`] when the block does not decode.
    pub fn parse(&self, text: &str) -> Result<FrontMatter> {
        let split = grammar::split(text).ok_or_else(|| {
            debug!("document does not start with a delimited front matter block");
            MatterYamlError::Format
        })?;

        let data = yaml::decode(split.yaml, &self.config.decode).map_err(|e| {
            debug!("front matter block failed to decode: {}", e);
            MatterYamlError::yaml_parse(e.message())
        })?;

        Ok(FrontMatter {
            data,
            content: split.content.to_string(),
        })
    }

    /// Parse a document and deserialize its front matter into `T`
    pub fn parse_as<T: DeserializeOwned>(&self, text: &str) -> Result<FrontMatter<T>> {
        let FrontMatter { data, content } = self.parse(text)?;
        let data =
            serde_yaml::from_value(data).map_err(|e| MatterYamlError::yaml_parse(e.to_string()))?;
        Ok(FrontMatter { data, content })
    }

    /// Join data and content into a front matter document
    ///
    /// Output is exactly `---\n<yaml>\n---\n<content>`, with no line break
    /// added after the content.
    pub fn serialize<T: Serialize + ?Sized>(&self, data: &T, content: &str) -> Result<String> {
        self.serialize_with(data, content, &self.config.encode)
    }

    /// Like [`serialize`](Self::serialize) with per-call encode options
    pub fn serialize_with<T: Serialize + ?Sized>(
        &self,
        data: &T,
        content: &str,
        options: &EncodeOptions,
    ) -> Result<String> {
        let value = serde_yaml::to_value(data)
            .map_err(|e| MatterYamlError::yaml_serialize(e.to_string()))?;
        ensure_object(&value)?;
        render(&value, content, options)
    }

    /// Check whether a document would parse; never fails
    pub fn validate(&self, text: &str) -> bool {
        match self.parse(text) {
            Ok(_) => true,
            Err(e) => {
                trace!("validation rejected document: {}", e);
                false
            }
        }
    }

    /// [`parse`](Self::parse) for input whose type is only known at runtime
    pub fn parse_value(&self, input: &Value) -> Result<FrontMatter> {
        match input {
            Value::String(text) => self.parse(text),
            other => Err(MatterYamlError::type_mismatch(
                "parse",
                "a string",
                yaml::type_name(other),
            )),
        }
    }

    /// [`serialize`](Self::serialize) for input whose types are only known at runtime
    pub fn serialize_value(&self, data: &Value, content: &Value) -> Result<String> {
        self.serialize_value_with(data, content, &self.config.encode)
    }

    /// [`serialize_value`](Self::serialize_value) with per-call encode options
    pub fn serialize_value_with(
        &self,
        data: &Value,
        content: &Value,
        options: &EncodeOptions,
    ) -> Result<String> {
        ensure_object(data)?;
        let Value::String(content) = content else {
            return Err(MatterYamlError::type_mismatch(
                "serialize",
                "a string",
                yaml::type_name(content),
            ));
        };
        render(data, content, options)
    }

    /// [`validate`](Self::validate) for input of any type; `false` unless it is a valid document
    pub fn validate_value(&self, input: &Value) -> bool {
        self.parse_value(input).is_ok()
    }
}

fn ensure_object(data: &Value) -> Result<()> {
    if yaml::is_object(data) {
        Ok(())
    } else {
        Err(MatterYamlError::type_mismatch(
            "serialize",
            "an object",
            yaml::type_name(data),
        ))
    }
}

fn render(data: &Value, content: &str, options: &EncodeOptions) -> Result<String> {
    let encoded = emitter::encode(data, options).map_err(|e| {
        debug!("front matter data failed to encode: {}", e);
        MatterYamlError::yaml_serialize(e.message())
    })?;
    Ok(format!("---\n{}\n---\n{}", encoded.trim(), content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde::ser::Error as _;
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Post {
        title: String,
        #[serde(default)]
        tags: Vec<String>,
        published: bool,
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(S::Error::custom("refusing to encode"))
        }
    }

    #[test]
    fn test_parse_into_struct() {
        let codec = FrontMatterCodec::new();
        let record: FrontMatter<Post> = codec
            .parse_as("---\ntitle: Typed\ntags: [a]\npublished: true\n---\nBody")
            .unwrap();
        assert_eq!(
            record.data,
            Post {
                title: "Typed".to_string(),
                tags: vec!["a".to_string()],
                published: true,
            }
        );
        assert_eq!(record.content, "Body");
    }

    #[test]
    fn test_parse_into_struct_with_missing_field() {
        let codec = FrontMatterCodec::new();
        let err = codec
            .parse_as::<Post>("---\ntitle: Typed\n---\nBody")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::YamlParse);
        assert!(err.to_string().contains("published"));
    }

    #[test]
    fn test_serialize_struct() {
        let codec = FrontMatterCodec::new();
        let post = Post {
            title: "Typed".to_string(),
            tags: vec![],
            published: false,
        };
        assert_eq!(
            codec.serialize(&post, "Body\n").unwrap(),
            "---\ntitle: Typed\ntags: []\npublished: false\n---\nBody\n"
        );
    }

    #[test]
    fn test_serialize_rejects_scalars() {
        let codec = FrontMatterCodec::new();

        let err = codec.serialize(&None::<Post>, "x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "serialize expected an object, but received null."
        );

        let err = codec.serialize("invalid", "x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "serialize expected an object, but received string."
        );
    }

    #[test]
    fn test_serialize_accepts_sequences() {
        let codec = FrontMatterCodec::new();
        assert_eq!(
            codec.serialize(&["a", "b"], "").unwrap(),
            "---\n- a\n- b\n---\n"
        );
    }

    #[test]
    fn test_serialize_reports_serde_failures() {
        let codec = FrontMatterCodec::new();
        let err = codec.serialize(&Unencodable, "x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::YamlSerialize);
        assert!(err.to_string().starts_with("YAML Serialization Error: "));
        assert!(err.to_string().contains("refusing to encode"));
    }

    #[test]
    fn test_serialize_reports_encoder_failures() {
        let codec = FrontMatterCodec::new();
        let mut data = BTreeMap::new();
        data.insert(vec![1, 2], "complex key");
        let err = codec.serialize(&data, "x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::YamlSerialize);
    }

    #[test]
    fn test_serialize_with_options() {
        let codec = FrontMatterCodec::new();
        let data: Value = serde_yaml::from_str("b: 1\na: [x]").unwrap();
        let options = EncodeOptions {
            sort_keys: true,
            no_array_indent: true,
            ..Default::default()
        };
        assert_eq!(
            codec.serialize_with(&data, "Body", &options).unwrap(),
            "---\na:\n- x\nb: 1\n---\nBody"
        );
    }

    #[test]
    fn test_configured_encode_options_apply() {
        let codec = FrontMatterCodec::with_config(CodecConfig {
            encode: EncodeOptions {
                indent: 4,
                ..Default::default()
            },
            ..Default::default()
        });
        let data: Value = serde_yaml::from_str("tags: [x]").unwrap();
        assert_eq!(
            codec.serialize(&data, "").unwrap(),
            "---\ntags:\n    - x\n---\n"
        );
        assert_eq!(codec.config().encode.indent, 4);
    }

    #[test]
    fn test_custom_tags_config() {
        let text = "---\npath: !include other.yml\n---\n";
        assert!(!FrontMatterCodec::new().validate(text));

        let codec = FrontMatterCodec::with_config(CodecConfig {
            decode: DecodeOptions {
                allow_custom_tags: true,
            },
            ..Default::default()
        });
        let record = codec.parse(text).unwrap();
        assert_eq!(
            codec
                .serialize_value(&record.data, &Value::from(record.content))
                .unwrap(),
            "---\npath: !include other.yml\n---\n"
        );
    }

    #[test]
    fn test_parse_value_type_check() {
        let codec = FrontMatterCodec::new();
        let err = codec.parse_value(&Value::from(12)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(err.to_string(), "parse expected a string, but received number.");

        let record = codec
            .parse_value(&Value::from("---\na: 1\n---\nrest"))
            .unwrap();
        assert_eq!(record.content, "rest");
    }

    #[test]
    fn test_serialize_value_type_checks() {
        let codec = FrontMatterCodec::new();
        let empty = Value::Mapping(Default::default());

        let err = codec
            .serialize_value(&Value::Null, &Value::from("x"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);

        let err = codec.serialize_value(&empty, &Value::from(123)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "serialize expected a string, but received number."
        );

        let err = codec.serialize_value(&empty, &Value::Null).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);

        // The data check runs first.
        let err = codec
            .serialize_value(&Value::from("invalid"), &Value::Null)
            .unwrap_err();
        assert!(err.to_string().contains("expected an object"));
    }

    #[test]
    fn test_validate_value_is_total() {
        let codec = FrontMatterCodec::new();
        assert!(!codec.validate_value(&Value::Null));
        assert!(!codec.validate_value(&Value::from(1)));
        assert!(!codec.validate_value(&Value::from("")));
        assert!(!codec.validate_value(&Value::Sequence(vec![])));
        assert!(codec.validate_value(&Value::from("---\na: 1\n---")));
    }

    #[test]
    fn test_codec_config_from_yaml() {
        let config: CodecConfig =
            serde_yaml::from_str("encode:\n  indent: 3\n  sort_keys: true\n").unwrap();
        assert_eq!(config.encode.indent, 3);
        assert!(config.encode.sort_keys);
        assert!(!config.decode.allow_custom_tags);
    }
}
