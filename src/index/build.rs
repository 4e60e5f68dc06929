//! Index construction pipeline.
//!
//! The corpus is a directory of block subdirectories, each small enough to
//! invert in memory. Blocks are tokenized and inverted in parallel, each
//! into its own intermediate index pair on disk, then a streaming k-way
//! merge combines the intermediates into the final index and deletes them.
//! Peak memory is one block's postings per worker, never the whole corpus.

use crate::index::iterator::IndexIterator;
use crate::index::merge::merge_indices;
use crate::index::types::{
    DOCS_FILE, DocId, FORMAT_VERSION, IndexConfig, IndexMeta, TERMS_FILE, TermId,
};
use crate::index::writer::IndexWriter;
use crate::utils::{IdMap, tokenize};
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use parking_lot::Mutex;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Totals reported after a successful build
#[derive(Debug, Clone, Copy)]
pub struct BuildSummary {
    pub blocks: usize,
    pub docs: usize,
    pub terms: usize,
}

/// Build the index for `data_dir` into `output_dir`.
///
/// `data_dir` holds one subdirectory per block; files directly under it are
/// ignored. The finished directory contains `<index_name>.index` and
/// `<index_name>.dict`, the persisted id maps and `meta.json`.
pub fn build_index(
    data_dir: &Path,
    output_dir: &Path,
    index_name: &str,
    config: &IndexConfig,
) -> Result<BuildSummary> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    let blocks = list_blocks(data_dir)?;

    let term_ids = Mutex::new(IdMap::new());
    let doc_ids = Mutex::new(IdMap::new());

    #[cfg(feature = "progress")]
    let bar = block_progress(blocks.len() as u64);

    // Invert every block into its own intermediate index
    let block_names = blocks
        .par_iter()
        .map(|block_dir| -> Result<String> {
            let pairs = parse_block(data_dir, block_dir, config, &term_ids, &doc_ids)?;
            let postings = invert(pairs);

            let name = format!("block_{block_dir}");
            let mut writer = IndexWriter::create(output_dir, &name, config.codec)?;
            for (term_id, docs) in &postings {
                writer.append(*term_id, docs)?;
            }
            writer.close()?;

            #[cfg(feature = "progress")]
            bar.inc(1);
            Ok(name)
        })
        .collect::<Result<Vec<String>>>()?;

    #[cfg(feature = "progress")]
    bar.finish_and_clear();

    let term_ids = term_ids.into_inner();
    let doc_ids = doc_ids.into_inner();
    term_ids
        .save(&output_dir.join(TERMS_FILE))
        .context("failed to save term id map")?;
    doc_ids
        .save(&output_dir.join(DOCS_FILE))
        .context("failed to save document id map")?;

    // Merge the intermediates into the final index, then discard them
    let mut inputs = Vec::with_capacity(block_names.len());
    for name in &block_names {
        inputs.push(IndexIterator::open(output_dir, name, config.codec)?);
    }
    let mut out = IndexWriter::create(output_dir, index_name, config.codec)?;
    merge_indices(&mut inputs, &mut out)?;
    let term_count = out.term_count();
    out.close()?;
    for input in inputs {
        input.close(true)?;
    }

    let meta = IndexMeta {
        version: FORMAT_VERSION,
        index_name: index_name.to_string(),
        codec: config.codec,
        doc_count: doc_ids.len() as u32,
        term_count: term_count as u32,
        block_count: block_names.len() as u32,
        created_at: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
    };
    meta.write(output_dir)?;

    Ok(BuildSummary {
        blocks: block_names.len(),
        docs: doc_ids.len(),
        terms: term_count,
    })
}

/// Block subdirectory names in lexicographic order
fn list_blocks(data_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(data_dir)
        .with_context(|| format!("failed to list {}", data_dir.display()))?;

    let mut blocks = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            blocks.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    blocks.sort();
    Ok(blocks)
}

/// Tokenize every document in one block into (term id, doc id) pairs, in
/// file order then token order.
///
/// Paths and tokens are mapped to dense ids through the shared maps; each
/// lock is held for one whole document so a document's ids are assigned
/// together.
fn parse_block(
    data_dir: &Path,
    block_dir: &str,
    config: &IndexConfig,
    term_ids: &Mutex<IdMap>,
    doc_ids: &Mutex<IdMap>,
) -> Result<Vec<(TermId, DocId)>> {
    let block_path = data_dir.join(block_dir);
    let mut files: Vec<PathBuf> = WalkBuilder::new(&block_path)
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();

    let mut pairs = Vec::new();
    for path in files {
        let len = fs::metadata(&path)
            .with_context(|| format!("failed to stat {}", path.display()))?
            .len();
        if len > config.max_file_size {
            continue;
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {} in block {}", path.display(), block_dir))?;
        let tokens = tokenize(&text);

        let rel = path.strip_prefix(data_dir).unwrap_or(&path);
        let doc_id = doc_ids.lock().get_or_insert(&rel.to_string_lossy());

        let mut ids = term_ids.lock();
        for token in &tokens {
            pairs.push((ids.get_or_insert(token), doc_id));
        }
    }
    Ok(pairs)
}

/// Group one block's pairs into term -> ascending unique doc ids.
///
/// The BTreeMap keys iterate in ascending term-id order, which is the order
/// the block writer must append in for the k-way merge to work.
pub fn invert(pairs: Vec<(TermId, DocId)>) -> BTreeMap<TermId, Vec<DocId>> {
    let mut grouped: BTreeMap<TermId, Vec<DocId>> = BTreeMap::new();
    for (term_id, doc_id) in pairs {
        grouped.entry(term_id).or_default().push(doc_id);
    }
    for postings in grouped.values_mut() {
        postings.sort_unstable();
        postings.dedup();
    }
    grouped
}

#[cfg(feature = "progress")]
fn block_progress(len: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} blocks")
            .unwrap()
            .progress_chars("#>-"),
    );
    bar
}
