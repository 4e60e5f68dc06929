//! Random-access postings lookup over a finished index.
//!
//! The postings file is memory-mapped and the dictionary loaded up front; a
//! lookup then touches exactly the byte range the dictionary records, so
//! cost is independent of index size. This is the query-side counterpart of
//! the streaming [`IndexIterator`](crate::index::iterator::IndexIterator).

use crate::index::codec::PostingsCodec;
use crate::index::dict::TermDict;
use crate::index::types::{DocId, TermId, dict_file, index_file};
use anyhow::{Context, Result, bail};
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

pub struct IndexMapper {
    index_path: PathBuf,
    /// `None` when the postings file is empty (zero-length files cannot be mapped)
    postings: Option<Mmap>,
    dict: TermDict,
    codec: PostingsCodec,
}

impl IndexMapper {
    /// Map the pair `<name>.index` / `<name>.dict` for random access
    pub fn open(dir: &Path, name: &str, codec: PostingsCodec) -> Result<Self> {
        let index_path = index_file(dir, name);
        let file = File::open(&index_path)
            .with_context(|| format!("failed to open {}", index_path.display()))?;
        let postings_len = file
            .metadata()
            .with_context(|| format!("failed to stat {}", index_path.display()))?
            .len();
        let dict = TermDict::load(&dict_file(dir, name), postings_len)?;

        let postings = if postings_len == 0 {
            None
        } else {
            Some(unsafe { Mmap::map(&file)? })
        };

        Ok(Self { index_path, postings, dict, codec })
    }

    /// Fetch the postings list for `term_id`.
    ///
    /// A term with no dictionary entry is a normal miss and yields an empty
    /// list, never an error.
    pub fn postings(&self, term_id: TermId) -> Result<Vec<DocId>> {
        let Some(entry) = self.dict.get(term_id).copied() else {
            return Ok(Vec::new());
        };

        // Dictionary validation bounds every entry inside the mapped file,
        // so a None map only ever coexists with zero-length entries
        let bytes = match &self.postings {
            Some(mmap) => &mmap[entry.offset as usize..(entry.offset + entry.byte_len as u64) as usize],
            None => &[][..],
        };

        let postings = self.codec.decode(bytes).with_context(|| {
            format!(
                "failed to decode postings for term {} in {}",
                term_id,
                self.index_path.display()
            )
        })?;
        if postings.len() != entry.doc_count as usize {
            bail!(
                "term {}: dictionary records {} postings but {} decoded",
                term_id,
                entry.doc_count,
                postings.len()
            );
        }
        Ok(postings)
    }

    /// Number of distinct terms in the index
    pub fn term_count(&self) -> usize {
        self.dict.len()
    }
}
