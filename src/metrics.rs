//! Run observability: per-worker counters, merged after the join.
//!
//! Hot-path updates are plain integer ops on worker-private structs - no
//! atomics, no contention. Aggregation happens once, after all workers have
//! been joined, so a snapshot is always internally consistent.
//!
//! `WorkerMetrics` is aligned to 64 bytes so adjacent workers' counters never
//! share a cache line if they end up in contiguous storage.

/// Counters owned by a single worker for the duration of its loop.
#[derive(Clone, Copy, Debug, Default)]
#[repr(align(64))]
pub struct WorkerMetrics {
    /// Chunks this worker claimed from the dispatcher.
    pub chunks_claimed: u64,
    /// Candidate lines this worker scored (including rejections).
    pub lines_scored: u64,
    /// Lines scoring zero. The pre-filter guarantees any surviving pair
    /// scores at least one match reward, so a zero means the pre-filter (or
    /// an empty input) rejected the pair before the kernel ran.
    pub lines_rejected: u64,
    /// Lines with a positive score, appended to the local match list.
    pub matches_found: u64,
    /// Lines scored through the transient-allocation path because they
    /// exceeded the scratch bound.
    pub scratch_fallbacks: u64,
}

/// Merged view of a whole run, produced by the aggregator.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunMetrics {
    pub workers: u64,
    pub chunks_claimed: u64,
    pub lines_scored: u64,
    pub lines_rejected: u64,
    pub matches_found: u64,
    pub scratch_fallbacks: u64,
}

impl RunMetrics {
    /// Fold one worker's counters into the snapshot.
    pub fn merge_worker(&mut self, w: &WorkerMetrics) {
        self.workers = self.workers.saturating_add(1);
        self.chunks_claimed = self.chunks_claimed.saturating_add(w.chunks_claimed);
        self.lines_scored = self.lines_scored.saturating_add(w.lines_scored);
        self.lines_rejected = self.lines_rejected.saturating_add(w.lines_rejected);
        self.matches_found = self.matches_found.saturating_add(w.matches_found);
        self.scratch_fallbacks = self.scratch_fallbacks.saturating_add(w.scratch_fallbacks);
    }
}
