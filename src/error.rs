//! Error types for the matter-yaml library
//!
//! Every failure raised by [`parse`](crate::parse) and [`serialize`](crate::serialize)
//! is one of four kinds. The rendered messages are part of the public contract,
//! so callers can either branch on [`MatterYamlError::kind`] or show the
//! [`Display`](std::fmt::Display) output directly.

use std::fmt;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatterYamlError {
    /// An argument had the wrong runtime type
    #[error("{function} expected {expected}, but received {received}.")]
    Type {
        function: &'static str,
        expected: &'static str,
        received: String,
    },

    /// The document does not match the front matter grammar
    #[error(
        "Invalid front matter format. Ensure the document starts with \"---\" and follows YAML syntax."
    )]
    Format,

    /// The front matter block could not be decoded
    #[error("YAML Parsing Error: {message}")]
    YamlParse { message: String },

    /// The data could not be encoded
    #[error("YAML Serialization Error: {message}")]
    YamlSerialize { message: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, MatterYamlError>;

/// Discriminant of [`MatterYamlError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Type,
    Format,
    YamlParse,
    YamlSerialize,
}

impl MatterYamlError {
    /// Create a new wrong-type error
    pub fn type_mismatch(
        function: &'static str,
        expected: &'static str,
        received: impl Into<String>,
    ) -> Self {
        Self::Type {
            function,
            expected,
            received: received.into(),
        }
    }

    /// Create a new YAML decode error
    pub fn yaml_parse(message: impl Into<String>) -> Self {
        Self::YamlParse {
            message: message.into(),
        }
    }

    /// Create a new YAML encode error
    pub fn yaml_serialize(message: impl Into<String>) -> Self {
        Self::YamlSerialize {
            message: message.into(),
        }
    }

    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Type { .. } => ErrorKind::Type,
            Self::Format => ErrorKind::Format,
            Self::YamlParse { .. } => ErrorKind::YamlParse,
            Self::YamlSerialize { .. } => ErrorKind::YamlSerialize,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => write!(f, "TYPE"),
            Self::Format => write!(f, "FORMAT"),
            Self::YamlParse => write!(f, "YAML_PARSE"),
            Self::YamlSerialize => write!(f, "YAML_SERIALIZE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_message() {
        let err = MatterYamlError::type_mismatch("parse", "a string", "number");
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(
            err.to_string(),
            "parse expected a string, but received number."
        );
    }

    #[test]
    fn test_format_message() {
        assert_eq!(
            MatterYamlError::Format.to_string(),
            "Invalid front matter format. Ensure the document starts with \"---\" and follows YAML syntax."
        );
    }

    #[test]
    fn test_yaml_messages_wrap_collaborator_text() {
        let err = MatterYamlError::yaml_parse("unknown tag !<!foo>");
        assert_eq!(err.kind(), ErrorKind::YamlParse);
        assert_eq!(err.to_string(), "YAML Parsing Error: unknown tag !<!foo>");

        let err = MatterYamlError::yaml_serialize("bad key");
        assert_eq!(err.kind(), ErrorKind::YamlSerialize);
        assert_eq!(err.to_string(), "YAML Serialization Error: bad key");
    }

    #[test]
    fn test_error_cloning() {
        let original = MatterYamlError::yaml_parse("boom");
        assert_eq!(original.clone(), original);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::YamlSerialize.to_string(), "YAML_SERIALIZE");
    }
}
