//! Lock-free chunk dispatch for the worker pool.
//!
//! # Design
//! The candidate list is partitioned into fixed-size chunks of lines. A
//! single shared cursor, advanced with an atomic fetch-add, hands each chunk
//! index to exactly one claimant. That is the only mutable state shared
//! between workers: the query and the line list are immutable for the run
//! and read without synchronization.
//!
//! A plain read-then-write on a shared counter would race - two workers could
//! observe the same index and score a chunk twice, or skip one entirely. The
//! single fetch-add instruction is both the claim and the advance.
//!
//! # Ordering
//! Chunk indices are claimed in increasing order; nothing is guaranteed about
//! completion order. The cursor is monotonic and never reset mid-run; once it
//! passes the chunk count, every further claim reports exhaustion.
//!
//! # Tuning
//! Larger chunks mean fewer fetch-adds (less cursor contention) but coarser
//! load balancing when line cost is uneven. This is a throughput knob, not a
//! correctness concern.

use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_utils::CachePadded;

/// Default lines per chunk.
pub const DEFAULT_CHUNK_LINES: usize = 512;

/// Hands out disjoint line ranges to concurrent claimants, exactly once each.
pub struct ChunkDispatcher {
    line_count: usize,
    chunk_lines: usize,
    chunk_count: usize,
    /// Next unclaimed chunk index. Padded to its own cache line so the one
    /// contended word does not false-share with the read-only fields.
    cursor: CachePadded<AtomicUsize>,
}

impl ChunkDispatcher {
    /// Create a dispatcher over `line_count` lines in chunks of `chunk_lines`.
    ///
    /// # Panics
    /// Panics if `chunk_lines` is 0.
    pub fn new(line_count: usize, chunk_lines: usize) -> Self {
        assert!(chunk_lines > 0, "chunk_lines must be > 0");
        Self {
            line_count,
            chunk_lines,
            chunk_count: line_count.div_ceil(chunk_lines),
            cursor: CachePadded::new(AtomicUsize::new(0)),
        }
    }

    /// Number of chunks this dispatcher will hand out in total.
    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// Claim the next chunk, or `None` once all chunks are taken.
    ///
    /// Safe to call from any number of threads concurrently: the fetch-add
    /// makes the claim atomic, so each chunk index is returned to exactly one
    /// caller. `Relaxed` suffices - the claim carries no data dependency,
    /// the line list is immutable, and uniqueness needs only atomicity.
    ///
    /// The final chunk is clamped to `line_count`. Claims after exhaustion
    /// keep nudging the cursor upward, which is harmless: overflowing would
    /// take 2^64 calls.
    pub fn claim(&self) -> Option<Range<usize>> {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        if index >= self.chunk_count {
            return None;
        }
        let start = index * self.chunk_lines;
        let end = (start + self.chunk_lines).min(self.line_count);
        Some(start..end)
    }
}
