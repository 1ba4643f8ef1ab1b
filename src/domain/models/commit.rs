//! Commit-related models.

use serde::Serialize;

/// Human-readable summary of one changeset, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitDescription {
    /// Short (10 character) commit hash.
    pub commit: String,
    pub description: String,
    /// Link to the changeset page; empty when the lookup failed.
    pub href: String,
}
