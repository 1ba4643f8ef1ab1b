//! Task-name filtering.
//!
//! User-supplied patterns select which tasks count toward completion and
//! scoring. A leading `!` negates a pattern; a task passes the set iff every
//! rule holds.

use regex::Regex;
use thiserror::Error;

/// Applied when no patterns are supplied: drop web-platform-test and
/// spidermonkey tasks, which never carry report artifacts of their own here.
const DEFAULT_FILTER: &str = "!-web-platform-tests-|-spidermonkey-";

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("invalid filter pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug)]
struct Rule {
    pattern: Regex,
    negate: bool,
}

impl Rule {
    fn compile(raw: &str, negate: bool) -> Result<Self, FilterError> {
        let pattern = Regex::new(raw).map_err(|source| FilterError::InvalidPattern {
            pattern: raw.to_string(),
            source,
        })?;
        Ok(Self { pattern, negate })
    }

    fn holds(&self, name: &str) -> bool {
        self.pattern.is_match(name) != self.negate
    }
}

/// Compiled allow/deny rule set over task names.
#[derive(Debug)]
pub struct TaskFilter {
    rules: Vec<Rule>,
}

impl TaskFilter {
    /// Compile a pattern list. Positive rules come first, then negated ones,
    /// matching the order they are split in. An empty list compiles the
    /// built-in default rule.
    pub fn new(patterns: &[String]) -> Result<Self, FilterError> {
        if patterns.is_empty() {
            return Self::new(&[DEFAULT_FILTER.to_string()]);
        }

        let mut rules = Vec::with_capacity(patterns.len());
        for raw in patterns.iter().filter(|p| !p.starts_with('!')) {
            rules.push(Rule::compile(raw, false)?);
        }
        for raw in patterns.iter().filter(|p| p.starts_with('!')) {
            rules.push(Rule::compile(&raw[1..], true)?);
        }
        Ok(Self { rules })
    }

    /// Conjunction over every rule: positive patterns must match, negated
    /// patterns must not. Pure predicate.
    pub fn matches(&self, task_name: &str) -> bool {
        self.rules.iter().all(|rule| rule.holds(task_name))
    }
}
