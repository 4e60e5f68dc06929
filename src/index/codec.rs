//! Postings list codecs.
//!
//! A codec is a pure transform between a strictly ascending, duplicate-free
//! list of document ids and a byte buffer. Writers, iterators and the mapper
//! are codec-agnostic; the chosen variant is recorded in `meta.json` so
//! query sessions decode with whatever the build encoded with.

use crate::index::types::DocId;
use crate::utils::encoding::{decode_varint, encode_varint};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Available postings list encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingsCodec {
    /// Every id as a fixed-width little-endian u32
    Uncompressed,
    /// First id followed by gaps, each as a varint. Ascending ids keep the
    /// gaps small, so dense postings compress to one or two bytes per id.
    #[default]
    VarintDelta,
}

impl PostingsCodec {
    /// Encode a postings list. Ids must be strictly ascending.
    pub fn encode(&self, postings: &[DocId]) -> Vec<u8> {
        debug_assert!(
            postings.windows(2).all(|w| w[0] < w[1]),
            "postings must be strictly ascending"
        );
        match self {
            PostingsCodec::Uncompressed => {
                let mut buf = Vec::with_capacity(postings.len() * 4);
                for &id in postings {
                    buf.extend_from_slice(&id.to_le_bytes());
                }
                buf
            }
            PostingsCodec::VarintDelta => {
                let mut buf = Vec::with_capacity(postings.len());
                let mut prev = 0u32;
                for &id in postings {
                    encode_varint(id - prev, &mut buf);
                    prev = id;
                }
                buf
            }
        }
    }

    /// Decode a postings list, consuming the entire buffer.
    ///
    /// Trailing bytes, truncated varints and length mismatches are all
    /// corruption and fail the decode.
    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<DocId>> {
        match self {
            PostingsCodec::Uncompressed => {
                if bytes.len() % 4 != 0 {
                    bail!(
                        "uncompressed postings length {} is not a multiple of 4",
                        bytes.len()
                    );
                }
                Ok(bytes
                    .chunks_exact(4)
                    .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                    .collect())
            }
            PostingsCodec::VarintDelta => {
                let mut postings = Vec::new();
                let mut prev = 0u32;
                let mut pos = 0;
                while pos < bytes.len() {
                    let Some((delta, consumed)) = decode_varint(&bytes[pos..]) else {
                        bail!("truncated varint at byte {pos} of postings list");
                    };
                    prev = match prev.checked_add(delta) {
                        Some(id) => id,
                        None => bail!("document id overflow at byte {pos} of postings list"),
                    };
                    postings.push(prev);
                    pos += consumed;
                }
                Ok(postings)
            }
        }
    }
}
