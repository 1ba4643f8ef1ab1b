//! Score aggregation models.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Running score for one category.
///
/// `score` is an exact fractional pass count, not a percentage; callers divide
/// by `total` to render one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryScore {
    pub score: f64,
    /// Number of expected tests in the category.
    pub total: usize,
}

impl CategoryScore {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.score / self.total as f64
        }
    }
}

/// Result of scoring one run against the expected universe.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub scores: BTreeMap<String, CategoryScore>,
    /// Tests that have not achieved a perfect score, including tests never
    /// observed in any report.
    pub failures: BTreeSet<String>,
    /// Size of the expected universe that maps to at least one category.
    pub total: usize,
}
