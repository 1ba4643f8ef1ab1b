//! Expected-test universe construction.
//!
//! Merges three independently-sourced documents: interop focus areas (which
//! categories count toward the year's score), category definitions (which
//! labels make up each category), and per-test metadata (which labels each
//! test carries).

use std::collections::{HashMap, HashSet};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::domain::models::ExpectedTests;

#[derive(Error, Debug)]
pub enum ExpectedError {
    #[error("{document} has no entry for year {year}")]
    MissingYear {
        document: &'static str,
        year: String,
    },

    #[error("failed to decode {document}: {source}")]
    Decode {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct FocusArea {
    #[serde(rename = "countsTowardScore", default)]
    counts_toward_score: bool,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct InteropYear {
    focus_areas: HashMap<String, FocusArea>,
}

#[derive(Debug, Deserialize)]
struct CategoryDef {
    name: String,
    #[serde(default)]
    labels: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CategoryYear {
    categories: Vec<CategoryDef>,
}

#[derive(Debug, Deserialize)]
struct MetadataEntry {
    #[serde(default)]
    label: Option<String>,
}

fn year_entry<T: DeserializeOwned>(
    document: &'static str,
    year: &str,
    value: &Value,
) -> Result<T, ExpectedError> {
    let entry = value.get(year).ok_or_else(|| ExpectedError::MissingYear {
        document,
        year: year.to_string(),
    })?;
    serde_json::from_value(entry.clone())
        .map_err(|source| ExpectedError::Decode { document, source })
}

/// Build the category → test-set mapping for one year.
///
/// Focus areas not flagged as score-counting are dropped, and only categories
/// matching a kept focus area survive. A category label with no matching
/// tests contributes nothing; that is not an error.
pub fn build_expected_tests(
    year: &str,
    interop: &Value,
    categories: &Value,
    metadata: &Value,
) -> Result<ExpectedTests, ExpectedError> {
    info!("getting expected tests for {year}");

    let interop_year: InteropYear = year_entry("interop data", year, interop)?;
    let category_year: CategoryYear = year_entry("category data", year, categories)?;
    let labelled: HashMap<String, Vec<MetadataEntry>> = serde_json::from_value(metadata.clone())
        .map_err(|source| ExpectedError::Decode {
            document: "test metadata",
            source,
        })?;

    let focus_areas: HashMap<&String, &FocusArea> = interop_year
        .focus_areas
        .iter()
        .filter(|(_, area)| area.counts_toward_score)
        .collect();

    let mut labelled_tests: HashMap<&str, HashSet<&str>> = HashMap::new();
    for (test, entries) in &labelled {
        for entry in entries {
            if let Some(label) = &entry.label {
                labelled_tests
                    .entry(label.as_str())
                    .or_default()
                    .insert(test.as_str());
            }
        }
    }

    let mut expected = ExpectedTests::default();
    for category in category_year
        .categories
        .iter()
        .filter(|category| focus_areas.contains_key(&category.name))
    {
        let mut tests: HashSet<String> = HashSet::new();
        for label in &category.labels {
            if let Some(matching) = labelled_tests.get(label.as_str()) {
                tests.extend(matching.iter().map(|test| (*test).to_string()));
            }
        }

        expected.tests.extend(tests.iter().cloned());
        if let Some(area) = focus_areas.get(&category.name) {
            expected
                .descriptions
                .insert(category.name.clone(), area.description.clone());
        }
        expected.categories.insert(category.name.clone(), tests);
    }

    Ok(expected)
}
