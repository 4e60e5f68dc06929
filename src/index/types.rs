//! Shared types for index construction and access:
//!
//! - `TermId` / `DocId` - dense u32 identifiers assigned by the id maps
//! - `DictEntry` - where one term's postings live in the index file
//! - `IndexMeta` - build metadata persisted as `meta.json`
//! - `IndexConfig` - knobs for the build pipeline

use crate::index::codec::PostingsCodec;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Dense identifier for a term, assigned in first-seen order
pub type TermId = u32;

/// Dense identifier for a document, assigned in first-seen order
pub type DocId = u32;

/// On-disk index format version
pub const FORMAT_VERSION: u32 = 1;

/// File holding the persisted term id map
pub const TERMS_FILE: &str = "terms.dict";

/// File holding the persisted document id map
pub const DOCS_FILE: &str = "docs.dict";

/// File holding the index metadata
pub const META_FILE: &str = "meta.json";

/// Path of the postings file for the index `name` under `dir`
pub fn index_file(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.index"))
}

/// Path of the dictionary file for the index `name` under `dir`
pub fn dict_file(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.dict"))
}

/// Location of one term's postings list inside the postings file.
///
/// `byte_len` is the exact encoded length, so readers can fetch the list
/// with a single bounded read; `doc_count` is cross-checked against the
/// decoded list to catch corruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictEntry {
    pub offset: u64,
    pub doc_count: u32,
    pub byte_len: u32,
}

/// Metadata written next to a finished index.
///
/// Records which codec the postings were encoded with, so query sessions
/// decode with the same one the build used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMeta {
    pub version: u32,
    pub index_name: String,
    pub codec: PostingsCodec,
    pub doc_count: u32,
    pub term_count: u32,
    pub block_count: u32,
    pub created_at: u64,
}

impl IndexMeta {
    /// Write metadata as pretty-printed JSON into `output_dir`
    pub fn write(&self, output_dir: &Path) -> Result<()> {
        let path = output_dir.join(META_FILE);
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, self)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Read and validate metadata from `output_dir`
    pub fn read(output_dir: &Path) -> Result<Self> {
        let path = output_dir.join(META_FILE);
        let file = File::open(&path)
            .with_context(|| format!("failed to open {} (has the index been built?)", path.display()))?;
        let meta: IndexMeta = serde_json::from_reader(file)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        if meta.version != FORMAT_VERSION {
            bail!(
                "unsupported index format version {} (this build reads version {})",
                meta.version,
                FORMAT_VERSION
            );
        }
        Ok(meta)
    }
}

/// Configuration for index construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Postings list encoding
    pub codec: PostingsCodec,
    /// Documents larger than this are skipped (bytes)
    pub max_file_size: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            codec: PostingsCodec::default(),
            max_file_size: 64 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IndexConfig::default();
        assert_eq!(config.codec, PostingsCodec::VarintDelta);
        assert_eq!(config.max_file_size, 64 * 1024 * 1024);
    }

    #[test]
    fn test_meta_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let meta = IndexMeta {
            version: FORMAT_VERSION,
            index_name: "main".to_string(),
            codec: PostingsCodec::Uncompressed,
            doc_count: 42,
            term_count: 1337,
            block_count: 3,
            created_at: 1_700_000_000,
        };
        meta.write(dir.path()).unwrap();

        let loaded = IndexMeta::read(dir.path()).unwrap();
        assert_eq!(loaded.index_name, "main");
        assert_eq!(loaded.codec, PostingsCodec::Uncompressed);
        assert_eq!(loaded.doc_count, 42);
        assert_eq!(loaded.term_count, 1337);
        assert_eq!(loaded.block_count, 3);
    }

    #[test]
    fn test_meta_version_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let mut meta = IndexMeta {
            version: FORMAT_VERSION + 9,
            index_name: "main".to_string(),
            codec: PostingsCodec::VarintDelta,
            doc_count: 0,
            term_count: 0,
            block_count: 0,
            created_at: 0,
        };
        meta.write(dir.path()).unwrap();
        assert!(IndexMeta::read(dir.path()).is_err());

        meta.version = FORMAT_VERSION;
        meta.write(dir.path()).unwrap();
        assert!(IndexMeta::read(dir.path()).is_ok());
    }

    #[test]
    fn test_meta_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(IndexMeta::read(dir.path()).is_err());
    }

    #[test]
    fn test_file_naming() {
        let dir = Path::new("/tmp/idx");
        assert_eq!(index_file(dir, "main"), PathBuf::from("/tmp/idx/main.index"));
        assert_eq!(dict_file(dir, "block_0"), PathBuf::from("/tmp/idx/block_0.dict"));
    }
}
