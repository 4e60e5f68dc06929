//! # bix - block-sorted disk indexing
//!
//! bix builds a disk-resident inverted index over document collections too
//! large to invert in memory. The corpus is split into blocks, each block is
//! inverted in memory and flushed to its own intermediate index on disk, and
//! a streaming k-way merge combines the intermediates into one final index.
//! Peak memory stays bounded by block size, not corpus size.
//!
//! Queries are conjunctive: all terms must appear in a document for it to
//! match.
//!
//! ## Architecture
//!
//! - [`index`] - construction pipeline, postings codecs, on-disk format,
//!   streaming and memory-mapped readers, k-way merge
//! - [`query`] - conjunctive retrieval sessions
//! - [`utils`] - id maps, byte-level encoding primitives, tokenizer
//! - [`output`] - CLI result printing
//!
//! ## Quick start
//!
//! ```ignore
//! use bix::index::{IndexConfig, build_index};
//! use bix::query::Searcher;
//!
//! build_index("corpus/".as_ref(), "idx/".as_ref(), "main", &IndexConfig::default())?;
//!
//! let searcher = Searcher::open("idx/".as_ref())?;
//! for path in searcher.retrieve("cat dog")? {
//!     println!("{path}");
//! }
//! ```

pub mod index;
pub mod output;
pub mod query;
pub mod utils;
