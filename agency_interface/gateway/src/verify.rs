//! Shallow issue verification.
//!
//! An issue passes when its top-level JSON object carries every key in
//! [`REQUIRED_ISSUE_FIELDS`]. Values, types and nesting are not inspected.

use serde_json::Value;

use crate::error::{GatewayError, Result};

pub const REQUIRED_ISSUE_FIELDS: [&str; 4] = ["id", "title", "description", "affected_areas"];

/// Outcome of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueVerdict {
    Valid,
    /// Lists the required keys that were absent, in canonical order
    Invalid { missing: Vec<&'static str> },
}

impl IssueVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, IssueVerdict::Valid)
    }
}

/// Parses `issue_json` and checks the required keys. Malformed JSON is an
/// error, never an `Invalid` verdict.
pub fn verify_issue(issue_json: &str) -> Result<IssueVerdict> {
    let issue: Value = serde_json::from_str(issue_json).map_err(GatewayError::IssueParse)?;
    Ok(check_required_fields(&issue))
}

/// Key-presence check on an already-parsed value. Non-objects have no keys.
pub fn check_required_fields(issue: &Value) -> IssueVerdict {
    let missing: Vec<&'static str> = match issue.as_object() {
        Some(map) => REQUIRED_ISSUE_FIELDS
            .iter()
            .copied()
            .filter(|field| !map.contains_key(*field))
            .collect(),
        None => REQUIRED_ISSUE_FIELDS.to_vec(),
    };

    if missing.is_empty() {
        IssueVerdict::Valid
    } else {
        IssueVerdict::Invalid { missing }
    }
}
