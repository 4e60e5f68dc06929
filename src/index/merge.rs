//! Streaming k-way merge of block indices into one final index.
//!
//! Every input replays its terms in ascending term-id order, so a min-heap
//! over the input heads visits each distinct term exactly once, smallest
//! first. Memory stays bounded by one postings list per input plus the
//! combined list being written.

use crate::index::iterator::IndexIterator;
use crate::index::types::{DocId, TermId};
use crate::index::writer::IndexWriter;
use anyhow::Result;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// The next (term, postings) pair one input will contribute
struct MergeHead {
    term_id: TermId,
    postings: Vec<DocId>,
    source: usize,
}

impl PartialEq for MergeHead {
    fn eq(&self, other: &Self) -> bool {
        self.term_id == other.term_id && self.source == other.source
    }
}

impl Eq for MergeHead {}

impl PartialOrd for MergeHead {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MergeHead {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest term; source breaks
        // ties for a deterministic pop order
        other
            .term_id
            .cmp(&self.term_id)
            .then_with(|| other.source.cmp(&self.source))
    }
}

/// Merge `inputs` into `out`.
///
/// At each step the smallest head term is popped, the postings of every
/// input positioned on that term are concatenated, sorted and deduplicated,
/// and the combined list is appended to `out`. Blocks partition the
/// documents so cross-input duplicates should not occur; the dedup guards
/// against overlapping inputs anyway.
///
/// Output terms come out in ascending term-id order, same as the inputs.
pub fn merge_indices(inputs: &mut [IndexIterator], out: &mut IndexWriter) -> Result<()> {
    let mut heap = BinaryHeap::with_capacity(inputs.len());
    for (source, input) in inputs.iter_mut().enumerate() {
        push_head(&mut heap, input, source)?;
    }

    while let Some(head) = heap.pop() {
        let term_id = head.term_id;
        let mut combined = head.postings;
        push_head(&mut heap, &mut inputs[head.source], head.source)?;

        while let Some(next) = heap.peek() {
            if next.term_id != term_id {
                break;
            }
            let Some(same) = heap.pop() else { break };
            combined.extend(same.postings);
            push_head(&mut heap, &mut inputs[same.source], same.source)?;
        }

        combined.sort_unstable();
        combined.dedup();
        out.append(term_id, &combined)?;
    }

    Ok(())
}

/// Advance one input and push its new head, if any
fn push_head(
    heap: &mut BinaryHeap<MergeHead>,
    input: &mut IndexIterator,
    source: usize,
) -> Result<()> {
    if let Some(item) = input.next() {
        let (term_id, postings) = item?;
        heap.push(MergeHead { term_id, postings, source });
    }
    Ok(())
}
