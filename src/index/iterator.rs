//! Forward-only streaming reader over an index pair.
//!
//! Replays `(term_id, postings)` in append order. Each step is one seek and
//! one exact-length read, so at most a single postings list is in memory no
//! matter how large the index is. This is what the k-way merge consumes.

use crate::index::codec::PostingsCodec;
use crate::index::dict::TermDict;
use crate::index::types::{DocId, TermId, dict_file, index_file};
use anyhow::{Context, Result, bail};
use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

pub struct IndexIterator {
    index_path: PathBuf,
    dict_path: PathBuf,
    file: File,
    codec: PostingsCodec,
    dict: TermDict,
    cursor: usize,
}

impl IndexIterator {
    /// Open the pair `<name>.index` / `<name>.dict` for streaming.
    ///
    /// The dictionary is validated against the postings file size up front,
    /// so a truncated or mismatched pair fails here rather than mid-stream.
    pub fn open(dir: &Path, name: &str, codec: PostingsCodec) -> Result<Self> {
        let index_path = index_file(dir, name);
        let dict_path = dict_file(dir, name);

        let file = File::open(&index_path)
            .with_context(|| format!("failed to open {}", index_path.display()))?;
        let postings_len = file
            .metadata()
            .with_context(|| format!("failed to stat {}", index_path.display()))?
            .len();
        let dict = TermDict::load(&dict_path, postings_len)?;

        Ok(Self { index_path, dict_path, file, codec, dict, cursor: 0 })
    }

    /// Total number of terms this iterator yields
    pub fn term_count(&self) -> usize {
        self.dict.order.len()
    }

    fn read_next(&mut self) -> Result<Option<(TermId, Vec<DocId>)>> {
        let Some(&term_id) = self.dict.order.get(self.cursor) else {
            return Ok(None);
        };
        self.cursor += 1;

        let Some(entry) = self.dict.get(term_id).copied() else {
            bail!("term {term_id} is in the replay order but has no dictionary entry");
        };

        let mut buf = vec![0u8; entry.byte_len as usize];
        self.file
            .seek(SeekFrom::Start(entry.offset))
            .with_context(|| format!("failed to seek in {}", self.index_path.display()))?;
        self.file.read_exact(&mut buf).with_context(|| {
            format!(
                "failed to read {} bytes at offset {} from {}",
                entry.byte_len,
                entry.offset,
                self.index_path.display()
            )
        })?;

        let postings = self
            .codec
            .decode(&buf)
            .with_context(|| format!("failed to decode postings for term {term_id}"))?;
        if postings.len() != entry.doc_count as usize {
            bail!(
                "term {}: dictionary records {} postings but {} decoded",
                term_id,
                entry.doc_count,
                postings.len()
            );
        }

        Ok(Some((term_id, postings)))
    }

    /// Consume the iterator, optionally deleting the pair from disk.
    /// Deletion is how intermediate block indices are discarded after a merge.
    pub fn close(self, delete_from_disk: bool) -> Result<()> {
        let IndexIterator { index_path, dict_path, file, .. } = self;
        drop(file);
        if delete_from_disk {
            fs::remove_file(&index_path)
                .with_context(|| format!("failed to delete {}", index_path.display()))?;
            fs::remove_file(&dict_path)
                .with_context(|| format!("failed to delete {}", dict_path.display()))?;
        }
        Ok(())
    }
}

impl Iterator for IndexIterator {
    type Item = Result<(TermId, Vec<DocId>)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::writer::IndexWriter;

    #[test]
    fn test_replays_in_append_order() {
        let dir = tempfile::tempdir().unwrap();
        let codec = PostingsCodec::VarintDelta;
        let mut writer = IndexWriter::create(dir.path(), "idx", codec).unwrap();
        writer.append(4, &[0, 2]).unwrap();
        writer.append(1, &[1]).unwrap();
        writer.append(9, &[0, 1, 2]).unwrap();
        writer.close().unwrap();

        let iter = IndexIterator::open(dir.path(), "idx", codec).unwrap();
        assert_eq!(iter.term_count(), 3);
        let items: Vec<_> = iter.map(|r| r.unwrap()).collect();
        assert_eq!(
            items,
            vec![(4, vec![0, 2]), (1, vec![1]), (9, vec![0, 1, 2])]
        );
    }

    #[test]
    fn test_empty_index_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let codec = PostingsCodec::Uncompressed;
        IndexWriter::create(dir.path(), "idx", codec).unwrap().close().unwrap();

        let mut iter = IndexIterator::open(dir.path(), "idx", codec).unwrap();
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_close_deletes_pair_when_asked() {
        let dir = tempfile::tempdir().unwrap();
        let codec = PostingsCodec::VarintDelta;
        let mut writer = IndexWriter::create(dir.path(), "idx", codec).unwrap();
        writer.append(0, &[5]).unwrap();
        writer.close().unwrap();

        let iter = IndexIterator::open(dir.path(), "idx", codec).unwrap();
        iter.close(false).unwrap();
        assert!(index_file(dir.path(), "idx").exists());

        let iter = IndexIterator::open(dir.path(), "idx", codec).unwrap();
        iter.close(true).unwrap();
        assert!(!index_file(dir.path(), "idx").exists());
        assert!(!dict_file(dir.path(), "idx").exists());
    }

    #[test]
    fn test_open_fails_on_truncated_postings() {
        let dir = tempfile::tempdir().unwrap();
        let codec = PostingsCodec::Uncompressed;
        let mut writer = IndexWriter::create(dir.path(), "idx", codec).unwrap();
        writer.append(0, &[1, 2, 3]).unwrap();
        writer.close().unwrap();

        let path = index_file(dir.path(), "idx");
        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() - 1]).unwrap();

        assert!(IndexIterator::open(dir.path(), "idx", codec).is_err());
    }

    #[test]
    fn test_doc_count_mismatch_is_an_error() {
        // Decoding 12 fixed-width bytes as varint-delta yields 12 postings
        // against the recorded count of 3
        let dir = tempfile::tempdir().unwrap();
        let mut writer = IndexWriter::create(dir.path(), "idx", PostingsCodec::Uncompressed).unwrap();
        writer.append(0, &[10, 20, 30]).unwrap();
        writer.close().unwrap();

        let mut iter = IndexIterator::open(dir.path(), "idx", PostingsCodec::VarintDelta).unwrap();
        assert!(iter.next().unwrap().is_err());
    }
}
