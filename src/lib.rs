//! Parallel fuzzy line ranking with an affine-gap local-alignment kernel.
//!
//! ## Scope
//! This crate scores candidate text lines (file paths, identifiers, command
//! names) against a query and returns every positively-scored line sorted
//! best-first. It is the computational core of an interactive fuzzy finder;
//! reading input, argument parsing, and printing live in the thin CLI on top.
//!
//! ## Key invariants
//! - Scoring is deterministic, case-sensitive, and byte-oriented; the result
//!   *set* is identical for any worker count.
//! - A cheap subsequence pre-filter gates the O(n·m) kernel; a positive score
//!   implies the query is a subsequence of the line.
//! - Workers never allocate per line in the common case: each owns one
//!   reusable matrix scratch, rewound between candidates.
//! - The only shared-mutable state during a run is the dispatch cursor,
//!   advanced by atomic fetch-add (exactly one owner per chunk).
//!
//! ## Run flow
//! `lines -> ChunkDispatcher -> workers (pre-filter -> kernel, private
//! scratch) -> per-worker match lists -> join -> sort descending`
//!
//! ## Notable entry points
//! - [`run_match`] / [`run_match_report`]: rank a line list.
//! - [`score::score`] / [`score::is_subsequence`]: the kernel itself.
//! - [`dispatch::ChunkDispatcher`], [`scratch::MatrixScratch`]: the moving
//!   parts, usable directly by embedders with their own worker loop.

pub mod dispatch;
pub mod metrics;
pub mod score;
pub mod scratch;

mod run;

pub use dispatch::DEFAULT_CHUNK_LINES;
pub use run::{run_match, run_match_report, LineMatch, MatchReport, RunConfig};
pub use scratch::SCRATCH_LINE_MAX;
