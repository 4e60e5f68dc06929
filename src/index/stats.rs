//! Statistics report for a built index

use crate::index::types::{IndexMeta, dict_file, index_file};
use anyhow::Result;
use std::fs;
use std::path::Path;

/// Print a summary of the index in `output_dir`
pub fn show_stats(output_dir: &Path) -> Result<()> {
    let meta = IndexMeta::read(output_dir)?;

    let postings_bytes = file_size(&index_file(output_dir, &meta.index_name));
    let dict_bytes = file_size(&dict_file(output_dir, &meta.index_name));

    println!("Index statistics");
    println!("----------------");
    println!("{:<18} {}", "Name:", meta.index_name);
    println!("{:<18} {}", "Location:", output_dir.display());
    println!("{:<18} {}", "Format version:", meta.version);
    println!("{:<18} {:?}", "Codec:", meta.codec);
    println!("{:<18} {}", "Documents:", meta.doc_count);
    println!("{:<18} {}", "Terms:", meta.term_count);
    println!("{:<18} {}", "Blocks merged:", meta.block_count);
    println!("{:<18} {}", "Postings size:", format_size(postings_bytes));
    println!("{:<18} {}", "Dictionary size:", format_size(dict_bytes));
    if meta.term_count > 0 {
        println!(
            "{:<18} {:.1} bytes/term",
            "Postings density:",
            postings_bytes as f64 / meta.term_count as f64
        );
    }
    Ok(())
}

fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
