//! Fuzzy line ranking CLI.
//!
//! Reads newline-delimited candidate lines from stdin as raw bytes, ranks
//! them against the query with the parallel matcher, and prints surviving
//! lines to stdout best-first.
//!
//! # Output Format
//!
//! Matching lines are written to stdout unchanged, one per line, sorted by
//! descending score. A summary is written to stderr upon completion:
//! `matched M of N lines (workers=W chunks=C fallbacks=F elapsed_ms=E)`
//!
//! # Exit Codes
//!
//! - `0`: Success (regardless of match count)
//! - `2`: Invalid arguments

use std::env;
use std::io::{self, BufWriter, Read, Write};
use std::time::Instant;

use linesift::{run_match_report, RunConfig};

fn print_usage(exe: &std::ffi::OsStr) {
    eprintln!(
        "usage: {} [OPTIONS] <query>

Reads candidate lines from stdin and prints fuzzy matches best-first.

OPTIONS:
    --workers=<N>    Number of worker threads (default: auto-detect CPU count)
    --help, -h       Show this help message",
        exe.to_string_lossy()
    );
}

/// Split a byte buffer into lines, dropping the trailing `\r` of CRLF input.
///
/// The final line is included even without a trailing newline.
fn split_lines(input: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;
    for end in memchr::memchr_iter(b'\n', input) {
        let mut line = &input[start..end];
        if let [head @ .., b'\r'] = line {
            line = head;
        }
        lines.push(line);
        start = end + 1;
    }
    if start < input.len() {
        let mut line = &input[start..];
        if let [head @ .., b'\r'] = line {
            line = head;
        }
        lines.push(line);
    }
    lines
}

fn main() -> io::Result<()> {
    let mut args = env::args_os();
    let exe = args.next().unwrap_or_else(|| "linesift".into());
    let mut query: Option<String> = None;
    let mut workers: Option<usize> = None;

    for arg in args {
        let Some(flag) = arg.to_str() else {
            eprintln!("invalid (non-UTF-8) argument");
            std::process::exit(2);
        };
        if let Some(value) = flag.strip_prefix("--workers=") {
            let n: usize = value.parse().unwrap_or_else(|_| {
                eprintln!("invalid --workers value: {}", value);
                std::process::exit(2);
            });
            if n == 0 {
                eprintln!("--workers must be >= 1");
                std::process::exit(2);
            }
            workers = Some(n);
            continue;
        }
        match flag {
            "--help" | "-h" => {
                print_usage(&exe);
                return Ok(());
            }
            _ if flag.starts_with('-') && flag.len() > 1 => {
                eprintln!("unknown option: {}", flag);
                print_usage(&exe);
                std::process::exit(2);
            }
            _ if query.is_none() => query = Some(flag.to_string()),
            _ => {
                eprintln!("unexpected extra argument: {}", flag);
                print_usage(&exe);
                std::process::exit(2);
            }
        }
    }

    let Some(query) = query else {
        print_usage(&exe);
        std::process::exit(2);
    };

    let mut input = Vec::new();
    io::stdin().lock().read_to_end(&mut input)?;
    let lines = split_lines(&input);

    let config = RunConfig {
        workers: workers.unwrap_or_else(|| num_cpus::get().max(1)),
        ..RunConfig::default()
    };

    let start = Instant::now();
    let report = run_match_report(query.as_bytes(), &lines, &config);

    // Batch all output through one buffer and flush once at the end.
    let stdout = io::stdout().lock();
    let mut out = BufWriter::new(stdout);
    for m in &report.matches {
        out.write_all(m.line)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    eprintln!(
        "matched {} of {} lines (workers={} chunks={} fallbacks={} elapsed_ms={})",
        report.matches.len(),
        lines.len(),
        report.metrics.workers,
        report.metrics.chunks_claimed,
        report.metrics.scratch_fallbacks,
        start.elapsed().as_millis(),
    );

    Ok(())
}
