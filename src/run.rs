//! Worker pool, run entry points, and result aggregation.
//!
//! # Run lifecycle
//!
//! ```text
//! query + lines ──► ChunkDispatcher (atomic cursor)
//!                        │ claim()               claim()
//!                        ▼                         ▼
//!                 sift-worker-0    ...      sift-worker-N
//!                 (own scratch,             (own scratch,
//!                  local matches,            local matches,
//!                  local metrics)            local metrics)
//!                        │                         │
//!                        └────────── join ─────────┘
//!                                     │
//!                        concat + sort desc + metrics merge
//! ```
//!
//! Workers are spawned once per run and joined before aggregation; nothing
//! dynamic happens mid-run. Each worker owns its scratch and match list for
//! its whole lifetime - the lists change hands exactly once, at the join.
//! All work is CPU-bound and runs to completion: there is no cancellation,
//! no timeout, and no partial-result path. A worker panic propagates through
//! the join rather than producing a silently incomplete ranking.

use std::thread;

use crate::dispatch::{ChunkDispatcher, DEFAULT_CHUNK_LINES};
use crate::metrics::{RunMetrics, WorkerMetrics};
use crate::score;
use crate::scratch::{MatrixScratch, SCRATCH_LINE_MAX};

/// Configuration for one matching run.
///
/// Both knobs are validated, not clamped: a zero is a caller bug.
#[derive(Clone, Copy, Debug)]
pub struct RunConfig {
    /// Number of worker threads. The pool is capped at the chunk count;
    /// extra workers would only claim exhaustion and exit.
    pub workers: usize,
    /// Lines per dispatched chunk.
    pub chunk_lines: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get().max(1),
            chunk_lines: DEFAULT_CHUNK_LINES,
        }
    }
}

impl RunConfig {
    /// Validate configuration invariants.
    ///
    /// # Panics
    /// Panics if `workers` or `chunk_lines` is 0.
    pub fn validate(&self) {
        assert!(self.workers > 0, "workers must be > 0");
        assert!(self.chunk_lines > 0, "chunk_lines must be > 0");
    }
}

/// One surviving candidate: the line and its positive score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineMatch<'a> {
    pub line: &'a [u8],
    pub score: u16,
}

/// Ranked matches plus the merged run counters.
#[derive(Debug)]
pub struct MatchReport<'a> {
    /// Matches sorted by descending score. Ties are in unspecified order.
    pub matches: Vec<LineMatch<'a>>,
    pub metrics: RunMetrics,
}

/// Rank `lines` against `query` using `workers` threads.
///
/// Returns every line with a positive score, sorted best-first. The result
/// set is identical for any worker count; only the order among equal scores
/// may vary.
///
/// # Panics
/// Panics if `workers` is 0.
pub fn run_match<'a>(query: &[u8], lines: &[&'a [u8]], workers: usize) -> Vec<LineMatch<'a>> {
    let config = RunConfig {
        workers,
        chunk_lines: DEFAULT_CHUNK_LINES,
    };
    run_match_report(query, lines, &config).matches
}

/// Like [`run_match`], with explicit configuration and merged run metrics.
pub fn run_match_report<'a>(
    query: &[u8],
    lines: &[&'a [u8]],
    config: &RunConfig,
) -> MatchReport<'a> {
    config.validate();

    let dispatcher = ChunkDispatcher::new(lines.len(), config.chunk_lines);
    let worker_count = config.workers.min(dispatcher.chunk_count());

    let mut matches = Vec::new();
    let mut metrics = RunMetrics::default();

    thread::scope(|s| {
        let mut handles = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let dispatcher = &dispatcher;
            let handle = thread::Builder::new()
                .name(format!("sift-worker-{worker_id}"))
                .spawn_scoped(s, move || worker_loop(query, lines, dispatcher))
                .expect("failed to spawn worker thread");
            handles.push(handle);
        }

        for handle in handles {
            let (local, worker_metrics) = match handle.join() {
                Ok(result) => result,
                // Fail fast: a lost worker means lost chunks, and a partial
                // ranking is worse than none.
                Err(payload) => std::panic::resume_unwind(payload),
            };
            matches.extend(local);
            metrics.merge_worker(&worker_metrics);
        }
    });

    matches.sort_unstable_by(|a, b| b.score.cmp(&a.score));

    MatchReport { matches, metrics }
}

/// One worker: claim chunks until exhaustion, score every line in each.
///
/// The scratch is built once, up front, sized for this run's query; lines
/// past [`SCRATCH_LINE_MAX`] take the kernel's transient-allocation path.
fn worker_loop<'a>(
    query: &[u8],
    lines: &[&'a [u8]],
    dispatcher: &ChunkDispatcher,
) -> (Vec<LineMatch<'a>>, WorkerMetrics) {
    let mut scratch = MatrixScratch::for_query(query.len());
    let mut local = Vec::new();
    let mut m = WorkerMetrics::default();

    while let Some(range) = dispatcher.claim() {
        m.chunks_claimed += 1;
        for &line in &lines[range] {
            m.lines_scored += 1;
            let line_score = score::score(query, line, &mut scratch);
            if line_score > 0 {
                if line.len() > SCRATCH_LINE_MAX {
                    m.scratch_fallbacks += 1;
                }
                m.matches_found += 1;
                local.push(LineMatch {
                    line,
                    score: line_score,
                });
            } else {
                m.lines_rejected += 1;
            }
        }
    }

    (local, m)
}
