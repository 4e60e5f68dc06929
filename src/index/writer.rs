//! Append-only writer for one index file pair.
//!
//! Postings stream to `<name>.index` as they are appended; the dictionary
//! (offset, doc count, byte length and append order per term) is held in
//! memory and persisted to `<name>.dict` by [`IndexWriter::close`].

use crate::index::codec::PostingsCodec;
use crate::index::dict::write_dict;
use crate::index::types::{DictEntry, DocId, TermId, dict_file, index_file};
use ahash::AHashMap;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct IndexWriter {
    index_path: PathBuf,
    dict_path: PathBuf,
    file: BufWriter<File>,
    codec: PostingsCodec,
    offset: u64,
    entries: AHashMap<TermId, DictEntry>,
    order: Vec<TermId>,
}

impl IndexWriter {
    /// Create (or truncate) the pair `<name>.index` / `<name>.dict` in `dir`
    pub fn create(dir: &Path, name: &str, codec: PostingsCodec) -> Result<Self> {
        let index_path = index_file(dir, name);
        let file = File::create(&index_path)
            .with_context(|| format!("failed to create {}", index_path.display()))?;
        Ok(Self {
            dict_path: dict_file(dir, name),
            index_path,
            file: BufWriter::new(file),
            codec,
            offset: 0,
            entries: AHashMap::new(),
            order: Vec::new(),
        })
    }

    /// Encode `postings` and append the bytes under `term_id`.
    ///
    /// Ids must be strictly ascending. Appending the same term twice
    /// overwrites its dictionary entry and strands the earlier bytes, so
    /// callers append each term at most once.
    pub fn append(&mut self, term_id: TermId, postings: &[DocId]) -> Result<()> {
        let encoded = self.codec.encode(postings);
        self.file
            .write_all(&encoded)
            .with_context(|| format!("failed to write to {}", self.index_path.display()))?;

        self.entries.insert(
            term_id,
            DictEntry {
                offset: self.offset,
                doc_count: postings.len() as u32,
                byte_len: encoded.len() as u32,
            },
        );
        self.order.push(term_id);
        self.offset += encoded.len() as u64;
        Ok(())
    }

    /// Number of distinct terms appended so far
    pub fn term_count(&self) -> usize {
        self.entries.len()
    }

    /// Total postings bytes written so far
    pub fn bytes_written(&self) -> u64 {
        self.offset
    }

    /// Flush the postings file and persist the dictionary.
    ///
    /// A dropped writer releases its file handle but writes no dictionary,
    /// leaving the pair unreadable until the next build truncates it.
    pub fn close(mut self) -> Result<()> {
        self.file
            .flush()
            .with_context(|| format!("failed to flush {}", self.index_path.display()))?;
        write_dict(&self.dict_path, &self.entries, &self.order)
    }
}
