//! Index construction and access.
//!
//! - [`build`] - block-parallel construction pipeline
//! - [`codec`] - postings list encodings
//! - [`dict`] - the `.dict` metadata file
//! - [`writer`] - append-only index writer
//! - [`iterator`] - streaming reader for the k-way merge
//! - [`mapper`] - memory-mapped random-access reader for queries
//! - [`merge`] - streaming k-way merge
//! - [`stats`] - index statistics report
//! - [`types`] - shared types and file naming

pub mod build;
pub mod codec;
pub mod dict;
pub mod iterator;
pub mod mapper;
pub mod merge;
pub mod stats;
pub mod types;
pub mod writer;

pub use build::{BuildSummary, build_index};
pub use codec::PostingsCodec;
pub use iterator::IndexIterator;
pub use mapper::IndexMapper;
pub use merge::merge_indices;
pub use types::{DictEntry, DocId, IndexConfig, IndexMeta, TermId};
pub use writer::IndexWriter;
