//! Recursive result scoring and per-category aggregation.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use tracing::{info, warn};

use crate::domain::models::{CategoryScore, ExpectedTests, ResultEntry, ScoreReport, WptReport};

/// Whether a status string counts as a failure for a parent entry.
pub fn is_failure(status: Option<&str>) -> bool {
    match status {
        None | Some("") => true,
        Some("OK" | "PASS") => false,
        Some(_) => true,
    }
}

/// Score one result tree in [0, 1].
///
/// A failure-classified parent (crash, error, timeout) zeroes the whole
/// subtree even if some subtests would pass; a passing parent defers entirely
/// to the arithmetic mean of its subtests. A leaf scores 1 iff its status is
/// exactly `PASS`.
pub fn score_test(entry: &ResultEntry) -> f64 {
    let count = entry.subtests.len();
    if count > 0 {
        if is_failure(entry.status.as_deref()) {
            return 0.0;
        }
        let subscore: f64 = entry.subtests.iter().map(score_test).sum();
        return subscore / count as f64;
    }

    if entry.status.as_deref() == Some("PASS") {
        1.0
    } else {
        0.0
    }
}

/// Flatten downloaded reports into a test → result mapping.
///
/// Tests outside the expected universe are dropped, and `SKIP` entries are
/// dropped entirely: skipped tests never reach the score fold, so they stay
/// in the failure set but add nothing to any category total. A test recorded
/// multiple times keeps the last entry.
pub fn load_tests(
    reports: &[WptReport],
    expected: &HashSet<String>,
) -> HashMap<String, ResultEntry> {
    info!("loading tests");
    let mut loaded = HashMap::new();
    for report in reports {
        for entry in &report.results {
            let Some(test) = &entry.test else {
                continue;
            };
            if !expected.contains(test) {
                continue;
            }
            if entry.status.as_deref() == Some("SKIP") {
                continue;
            }
            if loaded.contains_key(test) {
                warn!("{test} recorded multiple times");
            }
            loaded.insert(test.clone(), entry.clone());
        }
    }
    loaded
}

/// Fold loaded results into per-category totals and the remaining-failure
/// set.
///
/// A test belonging to multiple categories counts fully toward each. The
/// failure set starts as every expected test and shrinks only on a perfect
/// score, so tests never observed in any report remain failing.
pub fn compute_score(
    results: &HashMap<String, ResultEntry>,
    expected: &ExpectedTests,
) -> ScoreReport {
    info!("computing score");
    let categories_by_test = expected.categories_by_test();
    let mut failures: BTreeSet<String> = categories_by_test.keys().cloned().collect();

    let mut scores: BTreeMap<String, CategoryScore> = expected
        .categories
        .iter()
        .map(|(name, tests)| {
            (
                name.clone(),
                CategoryScore {
                    score: 0.0,
                    total: tests.len(),
                },
            )
        })
        .collect();

    for (test, entry) in results {
        let Some(categories) = categories_by_test.get(test) else {
            continue;
        };

        let score = score_test(entry);
        for category in categories {
            if let Some(slot) = scores.get_mut(category) {
                slot.score += score;
            }
        }

        if score == 1.0 {
            failures.remove(test);
        }
    }

    ScoreReport {
        total: categories_by_test.len(),
        scores,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(status: Option<&str>) -> ResultEntry {
        ResultEntry {
            status: status.map(|s| s.to_string()),
            ..Default::default()
        }
    }

    fn parent(status: &str, children: Vec<ResultEntry>) -> ResultEntry {
        ResultEntry {
            status: Some(status.to_string()),
            subtests: children,
            ..Default::default()
        }
    }

    #[test]
    fn leaf_scores() {
        assert_eq!(score_test(&leaf(Some("PASS"))), 1.0);
        assert_eq!(score_test(&leaf(Some("FAIL"))), 0.0);
        assert_eq!(score_test(&leaf(Some("TIMEOUT"))), 0.0);
        assert_eq!(score_test(&leaf(None)), 0.0);
        // OK is a harness status, not a leaf pass
        assert_eq!(score_test(&leaf(Some("OK"))), 0.0);
    }

    #[test]
    fn passing_parent_averages_children() {
        let entry = parent("OK", vec![leaf(Some("PASS")), leaf(Some("FAIL"))]);
        assert_eq!(score_test(&entry), 0.5);
    }

    #[test]
    fn failing_parent_dominates_children() {
        let entry = parent("ERROR", vec![leaf(Some("PASS")), leaf(Some("PASS"))]);
        assert_eq!(score_test(&entry), 0.0);
    }

    #[test]
    fn parent_without_status_fails() {
        let entry = ResultEntry {
            subtests: vec![leaf(Some("PASS"))],
            ..Default::default()
        };
        assert_eq!(score_test(&entry), 0.0);
    }

    #[test]
    fn nested_subtrees_average_recursively() {
        let inner = parent("OK", vec![leaf(Some("PASS")), leaf(Some("FAIL"))]);
        let entry = parent("OK", vec![inner, leaf(Some("PASS"))]);
        assert_eq!(score_test(&entry), 0.75);
    }

    fn expected_one_category(tests: &[&str]) -> ExpectedTests {
        let mut expected = ExpectedTests::default();
        let set: HashSet<String> = tests.iter().map(|t| t.to_string()).collect();
        expected.tests = set.clone();
        expected.categories.insert("layout".to_string(), set);
        expected
    }

    fn top(test: &str, status: &str, children: Vec<ResultEntry>) -> ResultEntry {
        ResultEntry {
            test: Some(test.to_string()),
            status: Some(status.to_string()),
            subtests: children,
            ..Default::default()
        }
    }

    #[test]
    fn compute_score_partial_universe() {
        let expected = expected_one_category(&["/a.html", "/b.html", "/c.html"]);

        // /a.html perfect, /b.html half, /c.html never observed
        let mut results = HashMap::new();
        results.insert("/a.html".to_string(), top("/a.html", "PASS", vec![]));
        results.insert(
            "/b.html".to_string(),
            top(
                "/b.html",
                "OK",
                vec![leaf(Some("PASS")), leaf(Some("FAIL"))],
            ),
        );

        let report = compute_score(&results, &expected);
        let layout = report.scores["layout"];
        assert_eq!(layout.total, 3);
        assert!((layout.score - 1.5).abs() < f64::EPSILON);
        assert_eq!(report.total, 3);
        assert_eq!(
            report.failures.iter().cloned().collect::<Vec<_>>(),
            vec!["/b.html".to_string(), "/c.html".to_string()]
        );
    }

    #[test]
    fn shared_test_counts_fully_toward_each_category() {
        let mut expected = expected_one_category(&["/a.html"]);
        expected.categories.insert(
            "text".to_string(),
            ["/a.html"].iter().map(|s| s.to_string()).collect(),
        );

        let mut results = HashMap::new();
        results.insert("/a.html".to_string(), top("/a.html", "PASS", vec![]));

        let report = compute_score(&results, &expected);
        assert_eq!(report.scores["layout"].score, 1.0);
        assert_eq!(report.scores["text"].score, 1.0);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn load_tests_drops_skip_and_unexpected() {
        let expected: HashSet<String> =
            ["/a.html", "/skip.html"].iter().map(|s| s.to_string()).collect();
        let report = WptReport {
            results: vec![
                top("/a.html", "PASS", vec![]),
                top("/skip.html", "SKIP", vec![]),
                top("/unexpected.html", "PASS", vec![]),
            ],
        };

        let loaded = load_tests(&[report], &expected);
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key("/a.html"));
        assert!(!loaded.contains_key("/skip.html"));
    }

    #[test]
    fn skipped_test_does_not_move_any_score() {
        let expected = expected_one_category(&["/a.html", "/skip.html"]);
        let report = WptReport {
            results: vec![
                top("/a.html", "PASS", vec![]),
                top("/skip.html", "SKIP", vec![]),
            ],
        };

        let loaded = load_tests(&[report], &expected.tests);
        let score_report = compute_score(&loaded, &expected);
        assert_eq!(score_report.scores["layout"].score, 1.0);
        // The skipped test was never folded in, so it stays in the failure set
        assert!(score_report.failures.contains("/skip.html"));
    }

    #[test]
    fn duplicate_entry_keeps_last() {
        let expected: HashSet<String> = ["/a.html"].iter().map(|s| s.to_string()).collect();
        let report = WptReport {
            results: vec![
                top("/a.html", "FAIL", vec![]),
                top("/a.html", "PASS", vec![]),
            ],
        };

        let loaded = load_tests(&[report], &expected);
        assert_eq!(loaded["/a.html"].status.as_deref(), Some("PASS"));
    }
}
