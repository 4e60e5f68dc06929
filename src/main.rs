use anyhow::{Result, bail};
use bix::index::types::IndexConfig;
use bix::index::{PostingsCodec, build_index, stats};
use bix::output::print_matches;
use bix::query::Searcher;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bix")]
#[command(about = "Disk-based block-sorted inverted indexing and boolean search")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an index from a directory of block subdirectories
    Index {
        /// Corpus directory, one subdirectory per block
        #[arg(short, long)]
        data: PathBuf,

        /// Directory to write the index into
        #[arg(short, long)]
        out: PathBuf,

        /// Name of the final merged index
        #[arg(long, default_value = "main")]
        name: String,

        /// Postings encoding: varint-delta or uncompressed
        #[arg(long, default_value = "varint-delta")]
        codec: String,
    },

    /// Find documents containing every query term
    Search {
        /// Index directory (the --out of a previous build)
        #[arg(short, long)]
        out: PathBuf,

        /// Query terms
        #[arg(required = true)]
        terms: Vec<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Show statistics for a built index
    Stats {
        /// Index directory
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn parse_codec(name: &str) -> Result<PostingsCodec> {
    match name {
        "varint-delta" | "varint" => Ok(PostingsCodec::VarintDelta),
        "uncompressed" | "raw" => Ok(PostingsCodec::Uncompressed),
        other => bail!("unknown codec '{other}' (expected varint-delta or uncompressed)"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Index { data, out, name, codec } => {
            let config = IndexConfig { codec: parse_codec(&codec)?, ..IndexConfig::default() };
            let summary = build_index(&data, &out, &name, &config)?;
            println!(
                "indexed {} documents in {} blocks ({} distinct terms)",
                summary.docs, summary.blocks, summary.terms
            );
        }
        Commands::Search { out, terms, no_color } => {
            let searcher = Searcher::open(&out)?;
            let matches = searcher.retrieve(&terms.join(" "))?;
            print_matches(&matches, !no_color)?;
        }
        Commands::Stats { out } => {
            stats::show_stats(&out)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codec() {
        assert_eq!(parse_codec("varint-delta").unwrap(), PostingsCodec::VarintDelta);
        assert_eq!(parse_codec("varint").unwrap(), PostingsCodec::VarintDelta);
        assert_eq!(parse_codec("uncompressed").unwrap(), PostingsCodec::Uncompressed);
        assert!(parse_codec("zstd").is_err());
    }
}
