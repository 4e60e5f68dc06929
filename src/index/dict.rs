//! The `.dict` metadata file: for every term in an index, where its postings
//! live in the companion `.index` file.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! entry_count: u32
//! repeated entry_count times:
//!   term_id:   u32
//!   offset:    u64
//!   doc_count: u32
//!   byte_len:  u32
//! ```
//!
//! Entries are written in append order, so the file doubles as the replay
//! order for streaming iteration.

use crate::index::types::{DictEntry, TermId};
use crate::utils::encoding::{read_u32_le, read_u64_le, write_u32_le, write_u64_le};
use ahash::AHashMap;
use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// In-memory image of a dictionary file
#[derive(Debug, Default)]
pub struct TermDict {
    /// Lookup by term id
    pub entries: AHashMap<TermId, DictEntry>,
    /// Term ids in the order they were appended
    pub order: Vec<TermId>,
}

impl TermDict {
    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, term_id: TermId) -> Option<&DictEntry> {
        self.entries.get(&term_id)
    }

    /// Load a dictionary and validate every entry against the size of the
    /// postings file it describes. Any inconsistency fails the load.
    pub fn load(path: &Path, postings_len: u64) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open dictionary {}", path.display()))?;
        let mut reader = BufReader::new(file);

        let count = read_u32_le(&mut reader)
            .with_context(|| format!("corrupt dictionary {}: missing entry count", path.display()))?;

        let mut dict = TermDict {
            entries: AHashMap::with_capacity(count as usize),
            order: Vec::with_capacity(count as usize),
        };

        for i in 0..count {
            let (term_id, entry) = read_entry(&mut reader)
                .with_context(|| format!("corrupt dictionary {}: truncated entry {i}", path.display()))?;

            match entry.offset.checked_add(entry.byte_len as u64) {
                Some(end) if end <= postings_len => {}
                _ => bail!(
                    "corrupt dictionary {}: term {} points at bytes {}..{} but the postings file has {}",
                    path.display(),
                    term_id,
                    entry.offset,
                    entry.offset as u128 + entry.byte_len as u128,
                    postings_len
                ),
            }

            dict.entries.insert(term_id, entry);
            dict.order.push(term_id);
        }

        let mut trailing = [0u8; 1];
        if reader.read(&mut trailing)? != 0 {
            bail!(
                "corrupt dictionary {}: trailing bytes after {} entries",
                path.display(),
                count
            );
        }

        Ok(dict)
    }
}

fn read_entry(reader: &mut impl Read) -> Result<(TermId, DictEntry)> {
    let term_id = read_u32_le(reader)?;
    let offset = read_u64_le(reader)?;
    let doc_count = read_u32_le(reader)?;
    let byte_len = read_u32_le(reader)?;
    Ok((term_id, DictEntry { offset, doc_count, byte_len }))
}

/// Persist dictionary entries in append order
pub fn write_dict(
    path: &Path,
    entries: &AHashMap<TermId, DictEntry>,
    order: &[TermId],
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create dictionary {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    write_u32_le(&mut writer, order.len() as u32)?;
    for &term_id in order {
        let Some(entry) = entries.get(&term_id) else {
            bail!("term {term_id} is in the append order but has no dictionary entry");
        };
        write_u32_le(&mut writer, term_id)?;
        write_u64_le(&mut writer, entry.offset)?;
        write_u32_le(&mut writer, entry.doc_count)?;
        write_u32_le(&mut writer, entry.byte_len)?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to flush dictionary {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample() -> (AHashMap<TermId, DictEntry>, Vec<TermId>) {
        let mut entries = AHashMap::new();
        entries.insert(3, DictEntry { offset: 0, doc_count: 2, byte_len: 8 });
        entries.insert(0, DictEntry { offset: 8, doc_count: 1, byte_len: 4 });
        entries.insert(7, DictEntry { offset: 12, doc_count: 5, byte_len: 11 });
        (entries, vec![3, 0, 7])
    }

    #[test]
    fn test_write_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.dict");
        let (entries, order) = sample();

        write_dict(&path, &entries, &order).unwrap();
        let dict = TermDict::load(&path, 23).unwrap();

        assert_eq!(dict.len(), 3);
        assert_eq!(dict.order, order);
        assert_eq!(dict.get(3), Some(&DictEntry { offset: 0, doc_count: 2, byte_len: 8 }));
        assert_eq!(dict.get(7), Some(&DictEntry { offset: 12, doc_count: 5, byte_len: 11 }));
        assert_eq!(dict.get(99), None);
    }

    #[test]
    fn test_empty_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.dict");
        write_dict(&path, &AHashMap::new(), &[]).unwrap();

        let dict = TermDict::load(&path, 0).unwrap();
        assert!(dict.is_empty());
        assert!(dict.order.is_empty());
    }

    #[test]
    fn test_load_rejects_out_of_bounds_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.dict");
        let (entries, order) = sample();
        write_dict(&path, &entries, &order).unwrap();

        // Postings file shorter than the last entry claims
        assert!(TermDict::load(&path, 22).is_err());
        assert!(TermDict::load(&path, 23).is_ok());
    }

    #[test]
    fn test_load_rejects_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.dict");
        let (entries, order) = sample();
        write_dict(&path, &entries, &order).unwrap();

        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();
        assert!(TermDict::load(&path, 23).is_err());
    }

    #[test]
    fn test_load_rejects_trailing_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.dict");
        let (entries, order) = sample();
        write_dict(&path, &entries, &order).unwrap();

        let mut bytes = fs::read(&path).unwrap();
        bytes.push(0xAB);
        fs::write(&path, &bytes).unwrap();
        assert!(TermDict::load(&path, 23).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TermDict::load(&dir.path().join("nope.dict"), 0).is_err());
    }
}
