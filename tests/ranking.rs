//! End-to-end ranking behavior through the public API.

use linesift::{run_match, run_match_report, RunConfig};

fn as_slices<'a>(lines: &[&'a str]) -> Vec<&'a [u8]> {
    lines.iter().map(|l| l.as_bytes()).collect()
}

#[test]
fn ranks_reference_corpus_best_first() {
    let lines = as_slices(&[
        "main.odin",
        "src/main.odin",
        "domain_manager.odin",
        "readme.txt",
    ]);

    let matches = run_match(b"main", &lines, 4);

    // Every line containing a contiguous "main" survives; "readme.txt" does
    // not even pass the subsequence pre-filter.
    assert_eq!(matches.len(), 3);
    assert!(matches.iter().all(|m| m.score > 0));
    assert!(!matches.iter().any(|m| m.line == b"readme.txt"));
    for pair in matches.windows(2) {
        assert!(
            pair[0].score >= pair[1].score,
            "ranking must be non-strictly descending"
        );
    }
}

#[test]
fn contiguous_match_outranks_scattered_match() {
    let lines = as_slices(&["fzr_sorter.c", "fuzzer.c", "freezer.rs"]);
    let matches = run_match(b"fzr", &lines, 2);

    assert_eq!(matches.len(), 3);
    // "fzr_sorter.c" starts with the query verbatim and must rank first.
    assert_eq!(matches[0].line, b"fzr_sorter.c");
    assert!(matches[0].score > matches[1].score);
}

#[test]
fn shorter_gaps_outrank_longer_ones() {
    let lines = as_slices(&["abc_d", "abc___d", "abc_____d"]);
    let matches = run_match(b"abcd", &lines, 1);

    assert_eq!(matches.len(), 3);
    assert_eq!(matches[0].line, b"abc_d");
    assert_eq!(matches[1].line, b"abc___d");
    assert_eq!(matches[2].line, b"abc_____d");
    assert!(matches[0].score > matches[1].score);
    assert!(matches[1].score > matches[2].score);
}

#[test]
fn large_corpus_is_worker_count_invariant() {
    let owned: Vec<String> = (0..5000)
        .map(|i| match i % 4 {
            0 => format!("src/module_{i}/main.rs"),
            1 => format!("docs/chapter_{i}.md"),
            2 => format!("target/debug/build_{i}.log"),
            _ => format!("tests/case_{i}.rs"),
        })
        .collect();
    let lines: Vec<&[u8]> = owned.iter().map(|l| l.as_bytes()).collect();

    let canonical = |workers: usize| {
        let mut pairs: Vec<(Vec<u8>, u16)> = run_match(b"srcmain", &lines, workers)
            .into_iter()
            .map(|m| (m.line.to_vec(), m.score))
            .collect();
        pairs.sort();
        pairs
    };

    let baseline = canonical(1);
    assert!(!baseline.is_empty());
    for workers in [2, 4, 8] {
        assert_eq!(canonical(workers), baseline);
    }
}

#[test]
fn report_metrics_cover_the_whole_corpus() {
    let owned: Vec<String> = (0..2000).map(|i| format!("entry_{i}")).collect();
    let lines: Vec<&[u8]> = owned.iter().map(|l| l.as_bytes()).collect();

    let config = RunConfig {
        workers: 3,
        chunk_lines: 128,
    };
    let report = run_match_report(b"entry", &lines, &config);

    assert_eq!(report.metrics.lines_scored, 2000);
    assert_eq!(report.metrics.chunks_claimed, 2000usize.div_ceil(128) as u64);
    assert_eq!(
        report.metrics.matches_found + report.metrics.lines_rejected,
        report.metrics.lines_scored
    );
    assert_eq!(report.metrics.matches_found, report.matches.len() as u64);
    assert!(report.metrics.workers >= 1 && report.metrics.workers <= 3);
}
