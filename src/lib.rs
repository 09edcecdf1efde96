//! matter-yaml: parse, serialize and validate YAML front matter
//!
//! A front matter document starts with a YAML block fenced by `---` lines,
//! followed by free-form content:
//!
//! ```text
//! ---
//! title: Hello World
//! tags:
//!   - yaml
//! ---
//! This is the document content.
//! ```
//!
//! The crate converts between such a document and a [`FrontMatter`] record
//! holding the decoded data and the content string.
//!
//! # Quick Start
//!
//! ```rust
//! use matter_yaml::{parse, serialize, validate, Result};
//!
//! fn main() -> Result<()> {
//!     let record = parse("---\ntitle: Hello\n---\nBody")?;
//!     assert_eq!(record.data["title"], "Hello");
//!     assert_eq!(record.content, "Body");
//!
//!     let text = serialize(&record.data, "New body")?;
//!     assert_eq!(text, "---\ntitle: Hello\n---\nNew body");
//!
//!     assert!(validate(&text));
//!     assert!(!validate("no front matter here"));
//!     Ok(())
//! }
//! ```
//!
//! ## Typed Front Matter
//!
//! ```rust
//! use matter_yaml::FrontMatterCodec;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Post {
//!     title: String,
//!     published: bool,
//! }
//!
//! let codec = FrontMatterCodec::new();
//! let post = codec
//!     .parse_as::<Post>("---\ntitle: Typed\npublished: true\n---\n")
//!     .unwrap();
//! assert_eq!(post.data.title, "Typed");
//! assert!(post.data.published);
//! ```
//!
//! # Architecture
//!
//! - [`core::grammar`](crate::core::grammar): finds the delimiters and splits the document
//! - [`core::yaml`](crate::core::yaml): decodes the YAML block through `serde_yaml`
//! - [`core::emitter`](crate::core::emitter): encodes data back to YAML with [`EncodeOptions`]
//! - [`core::codec`](crate::core::codec): [`FrontMatterCodec`], tying the pieces together
//! - [`error`]: the [`MatterYamlError`] taxonomy

// Public API exports
pub use error::{ErrorKind, MatterYamlError, Result};

// Core types
pub use self::core::{CodecConfig, DecodeOptions, EncodeOptions, FrontMatter, FrontMatterCodec};

pub mod core;
pub mod error;

/// Parse a document with the default codec
///
/// See [`FrontMatterCodec::parse`].
pub fn parse(text: &str) -> Result<FrontMatter> {
    FrontMatterCodec::new().parse(text)
}

/// Serialize data and content with the default codec
///
/// See [`FrontMatterCodec::serialize`].
pub fn serialize<T: serde::Serialize + ?Sized>(data: &T, content: &str) -> Result<String> {
    FrontMatterCodec::new().serialize(data, content)
}

/// Serialize data and content with explicit encode options
pub fn serialize_with<T: serde::Serialize + ?Sized>(
    data: &T,
    content: &str,
    options: &EncodeOptions,
) -> Result<String> {
    FrontMatterCodec::new().serialize_with(data, content, options)
}

/// Check whether a document has well-formed front matter
pub fn validate(text: &str) -> bool {
    FrontMatterCodec::new().validate(text)
}
