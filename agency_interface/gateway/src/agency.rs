// Typed view of a catalog record.

use serde_json::Value;

use crate::error::{GatewayError, Result};

/// The commonly used fields of an agency record. Free-form fields stay in
/// the raw record; use `Gateway::context` for the full document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agency {
    pub acronym: String,
    pub name: String,
    pub domain: String,
    pub description: String,
    pub tier: i32,
}

impl Agency {
    /// `acronym` and `name` are required. `domain` falls back to
    /// `"general"`, `description` to empty and `tier` to 0.
    pub fn from_record(record: &Value) -> Result<Self> {
        let acronym = record
            .get("acronym")
            .and_then(Value::as_str)
            .ok_or_else(|| GatewayError::MissingField {
                acronym: String::new(),
                field: "acronym",
            })?
            .to_owned();

        let name = record
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| GatewayError::MissingField {
                acronym: acronym.clone(),
                field: "name",
            })?
            .to_owned();

        let domain = record
            .get("domain")
            .and_then(Value::as_str)
            .unwrap_or("general")
            .to_owned();

        let description = record
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_owned();

        let tier = record
            .get("tier")
            .and_then(Value::as_i64)
            .and_then(|t| i32::try_from(t).ok())
            .unwrap_or(0);

        Ok(Self {
            acronym,
            name,
            domain,
            description,
            tier,
        })
    }
}
