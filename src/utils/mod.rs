//! Shared utilities.
//!
//! - [`encoding`] - Variable-length integer and little-endian primitives
//! - [`idmap`] - Dense string<->id assignment for terms and document paths
//! - [`tokenizer`] - Text to term-sequence tokenization

pub mod encoding;
pub mod idmap;
pub mod tokenizer;

pub use encoding::*;
pub use idmap::*;
pub use tokenizer::*;
