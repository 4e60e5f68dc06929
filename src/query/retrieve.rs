//! Conjunctive (AND) retrieval over a built index.
//!
//! A [`Searcher`] is one query session: the persisted id maps plus a
//! memory-mapped [`IndexMapper`]. Queries are tokenized exactly like
//! documents were, so a term matches iff the same token came out of some
//! document at build time.

use crate::index::mapper::IndexMapper;
use crate::index::types::{DOCS_FILE, DocId, IndexMeta, TERMS_FILE};
use crate::utils::{IdMap, tokenize};
use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::path::Path;

pub struct Searcher {
    term_ids: IdMap,
    doc_ids: IdMap,
    mapper: IndexMapper,
}

impl Searcher {
    /// Load a query session from an index directory.
    ///
    /// Reads `meta.json` for the index name and codec, the two id maps, and
    /// maps the postings file.
    pub fn open(output_dir: &Path) -> Result<Self> {
        let meta = IndexMeta::read(output_dir)?;
        let term_ids =
            IdMap::load(&output_dir.join(TERMS_FILE)).context("failed to load term id map")?;
        let doc_ids =
            IdMap::load(&output_dir.join(DOCS_FILE)).context("failed to load document id map")?;
        let mapper = IndexMapper::open(output_dir, &meta.index_name, meta.codec)?;
        Ok(Self { term_ids, doc_ids, mapper })
    }

    /// Documents containing every term of `query`, as sorted paths.
    ///
    /// A term the index has never seen makes the conjunction empty, so the
    /// result is an empty list rather than an error. Lookups never mutate
    /// the id maps.
    pub fn retrieve(&self, query: &str) -> Result<Vec<String>> {
        let terms = tokenize(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut lists: Vec<Vec<DocId>> = Vec::with_capacity(terms.len());
        for term in &terms {
            let Some(term_id) = self.term_ids.get(term) else {
                return Ok(Vec::new());
            };
            let postings = self.mapper.postings(term_id)?;
            if postings.is_empty() {
                return Ok(Vec::new());
            }
            lists.push(postings);
        }

        // Intersect shortest-first to keep intermediate results small
        lists.sort_by_key(Vec::len);
        let mut lists = lists.into_iter();
        let mut matched = lists.next().unwrap_or_default();
        for list in lists {
            matched = sorted_intersect(&matched, &list);
            if matched.is_empty() {
                break;
            }
        }

        let mut paths = Vec::with_capacity(matched.len());
        for doc_id in matched {
            paths.push(self.doc_ids.key_of(doc_id)?.to_string());
        }
        paths.sort();
        Ok(paths)
    }

    /// Number of distinct indexed terms
    pub fn term_count(&self) -> usize {
        self.term_ids.len()
    }

    /// Number of indexed documents
    pub fn doc_count(&self) -> usize {
        self.doc_ids.len()
    }
}

/// Intersection of two ascending duplicate-free id lists, by the two-pointer
/// walk. O(len(a) + len(b)).
pub fn sorted_intersect(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}
