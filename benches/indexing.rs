//! Performance benchmarks for bix
//!
//! Run with: cargo bench

use bix::index::types::{DocId, IndexConfig};
use bix::index::{IndexIterator, IndexWriter, PostingsCodec, build_index, merge_indices};
use bix::query::{Searcher, sorted_intersect};
use bix::utils::tokenize;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Synthetic corpus: `blocks` subdirectories of `docs_per_block` documents,
/// each drawing words from a shared vocabulary
fn create_corpus(blocks: usize, docs_per_block: usize) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path().to_path_buf();

    let vocab: Vec<String> = (0..500).map(|i| format!("word{i:03}")).collect();
    for block in 0..blocks {
        let block_dir = root.join(format!("{block:02}"));
        fs::create_dir(&block_dir).expect("Failed to create block dir");
        for doc in 0..docs_per_block {
            let words: Vec<&str> = (0..120)
                .map(|t| vocab[(block * 31 + doc * 7 + t * 13) % vocab.len()].as_str())
                .collect();
            fs::write(block_dir.join(format!("doc{doc:03}.txt")), words.join(" "))
                .expect("Failed to write doc");
        }
    }

    (temp_dir, root)
}

fn bench_codec_encode(c: &mut Criterion) {
    let postings: Vec<DocId> = (0..10_000).map(|i| i * 3).collect();

    let mut group = c.benchmark_group("codec_encode");
    for codec in [PostingsCodec::VarintDelta, PostingsCodec::Uncompressed] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{codec:?}")),
            &codec,
            |b, codec| b.iter(|| codec.encode(black_box(&postings))),
        );
    }
    group.finish();
}

fn bench_codec_decode(c: &mut Criterion) {
    let postings: Vec<DocId> = (0..10_000).map(|i| i * 3).collect();

    let mut group = c.benchmark_group("codec_decode");
    for codec in [PostingsCodec::VarintDelta, PostingsCodec::Uncompressed] {
        let encoded = codec.encode(&postings);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{codec:?}")),
            &encoded,
            |b, encoded| b.iter(|| codec.decode(black_box(encoded)).unwrap()),
        );
    }
    group.finish();
}

fn bench_tokenize(c: &mut Criterion) {
    let text = "The quick brown fox jumps over the lazy dog, 42 times; \
                then (quietly!) re-reads README.md and ships v1.2.3 to prod."
        .repeat(50);

    c.bench_function("tokenize_5kb", |b| b.iter(|| tokenize(black_box(&text))));
}

fn bench_sorted_intersect(c: &mut Criterion) {
    let a: Vec<DocId> = (0..20_000).map(|i| i * 2).collect();
    let b_list: Vec<DocId> = (0..20_000).map(|i| i * 3).collect();

    c.bench_function("sorted_intersect_20k", |b| {
        b.iter(|| sorted_intersect(black_box(&a), black_box(&b_list)))
    });
}

fn bench_merge(c: &mut Criterion) {
    let codec = PostingsCodec::VarintDelta;
    let dir = TempDir::new().expect("Failed to create temp dir");

    // Eight block indices with overlapping term ranges
    let names: Vec<String> = (0..8).map(|i| format!("block_{i}")).collect();
    for (i, name) in names.iter().enumerate() {
        let mut writer = IndexWriter::create(dir.path(), name, codec).expect("create");
        for term_id in 0..2_000u32 {
            if (term_id as usize + i) % 3 == 0 {
                let postings: Vec<DocId> = (0..20).map(|d| d * 8 + i as u32).collect();
                writer.append(term_id, &postings).expect("append");
            }
        }
        writer.close().expect("close");
    }

    c.bench_function("merge_8_blocks_2k_terms", |b| {
        b.iter(|| {
            let mut inputs: Vec<IndexIterator> = names
                .iter()
                .map(|name| IndexIterator::open(dir.path(), name, codec).expect("open"))
                .collect();
            let mut out = IndexWriter::create(dir.path(), "merged", codec).expect("create");
            merge_indices(&mut inputs, &mut out).expect("merge");
            out.close().expect("close");
        })
    });
}

fn bench_build_and_search(c: &mut Criterion) {
    let (_corpus_dir, root) = create_corpus(4, 50);

    c.bench_function("build_4_blocks_200_docs", |b| {
        b.iter(|| {
            let out = TempDir::new().expect("Failed to create temp dir");
            build_index(&root, out.path(), "main", &IndexConfig::default()).expect("build")
        })
    });

    let out = TempDir::new().expect("Failed to create temp dir");
    build_index(&root, out.path(), "main", &IndexConfig::default()).expect("build");
    let searcher = Searcher::open(out.path()).expect("open");

    c.bench_function("search_two_terms", |b| {
        b.iter(|| searcher.retrieve(black_box("word042 word123")).unwrap())
    });
}

criterion_group!(
    benches,
    bench_codec_encode,
    bench_codec_decode,
    bench_tokenize,
    bench_sorted_intersect,
    bench_merge,
    bench_build_and_search
);
criterion_main!(benches);
