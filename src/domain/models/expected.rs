//! The expected-test universe for one scoring year.

use std::collections::{BTreeMap, HashMap, HashSet};

/// Category → test-set mapping derived from the reference documents, plus the
/// union of every category's tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpectedTests {
    /// Category name → tests belonging to it.
    pub categories: BTreeMap<String, HashSet<String>>,
    /// Category name → human description from the focus-area document.
    pub descriptions: BTreeMap<String, String>,
    /// Union of all category test sets.
    pub tests: HashSet<String>,
}

impl ExpectedTests {
    /// Inverse mapping: test → every category containing it. A test may belong
    /// to multiple categories.
    pub fn categories_by_test(&self) -> HashMap<String, Vec<String>> {
        let mut by_test: HashMap<String, Vec<String>> = HashMap::new();
        for (category, tests) in &self.categories {
            for test in tests {
                by_test
                    .entry(test.clone())
                    .or_default()
                    .push(category.clone());
            }
        }
        by_test
    }
}
