//! wptreport result documents.
//!
//! A report holds one result entry per test; entries nest recursively through
//! `subtests`. Statuses are kept as raw strings because the set of values in
//! the wild is open-ended; classification lives in the scoring service.

use serde::{Deserialize, Serialize};

/// Outcome for one test or subtest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// Test id; present on top-level entries only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
    /// Subtest name; present on nested entries only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtests: Vec<ResultEntry>,
}

/// One downloaded test-result artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WptReport {
    #[serde(default)]
    pub results: Vec<ResultEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_deserializes_with_nested_subtests() {
        let raw = serde_json::json!({
            "results": [
                {
                    "test": "/css/test.html",
                    "status": "OK",
                    "subtests": [
                        { "name": "first", "status": "PASS" },
                        { "name": "second", "status": "FAIL" }
                    ]
                },
                { "test": "/dom/leaf.html", "status": "PASS" }
            ]
        });
        let report: WptReport = serde_json::from_value(raw).unwrap();
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].subtests.len(), 2);
        assert_eq!(report.results[1].subtests.len(), 0);
        assert_eq!(report.results[1].status.as_deref(), Some("PASS"));
    }

    #[test]
    fn missing_status_stays_absent() {
        let entry: ResultEntry = serde_json::from_value(serde_json::json!({
            "test": "/x.html"
        }))
        .unwrap();
        assert!(entry.status.is_none());
    }
}
