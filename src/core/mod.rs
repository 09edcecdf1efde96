//! Core types and domain logic: the delimiter grammar, the YAML
//! collaborators and the codec built on them.

pub mod codec;
pub mod emitter;
pub mod grammar;
pub mod tags;
pub mod yaml;

pub use codec::{CodecConfig, FrontMatter, FrontMatterCodec};
pub use emitter::{EncodeError, EncodeOptions};
pub use yaml::{DecodeError, DecodeOptions};
