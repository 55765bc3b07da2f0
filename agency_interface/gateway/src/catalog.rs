//! In-memory agency catalog.
//!
//! Holds the `agencies` array of the configuration document as raw JSON
//! values so every record serializes back verbatim, free-form fields and key
//! order included. Lookups are linear scans in document order.

use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::{GatewayError, Result};

/// Parsed `agencies` array plus the file it came from.
#[derive(Debug, Clone, Default)]
pub struct AgencyCatalog {
    records: Vec<Value>,
    source: Option<PathBuf>,
}

impl AgencyCatalog {
    /// Reads and parses a configuration document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GatewayError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let document: Value =
            serde_json::from_str(&text).map_err(|source| GatewayError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut catalog = Self::from_document(document)?;
        catalog.source = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Builds a catalog from an already-parsed document.
    pub fn from_document(document: Value) -> Result<Self> {
        match document {
            Value::Object(mut map) => match map.remove("agencies") {
                Some(Value::Array(records)) => Ok(Self {
                    records,
                    source: None,
                }),
                _ => Err(GatewayError::MissingAgencies),
            },
            _ => Err(GatewayError::MissingAgencies),
        }
    }

    /// File this catalog was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// First record whose `acronym` equals `acronym` exactly (case-sensitive).
    pub fn find(&self, acronym: &str) -> Option<&Value> {
        self.records
            .iter()
            .find(|record| acronym_of(record) == Some(acronym))
    }

    pub fn contains(&self, acronym: &str) -> bool {
        self.find(acronym).is_some()
    }

    /// Every acronym, in document order.
    pub fn acronyms(&self) -> Vec<&str> {
        self.records.iter().filter_map(acronym_of).collect()
    }

    /// Acronyms of records whose `tier` equals `tier`. No range check: a tier
    /// outside 1..=8 simply matches nothing.
    pub fn acronyms_by_tier(&self, tier: i64) -> Vec<&str> {
        self.records
            .iter()
            // Only JSON integers count; 3.0 or "3" never match
            .filter(|record| record.get("tier").and_then(Value::as_i64) == Some(tier))
            .filter_map(acronym_of)
            .collect()
    }

    /// Acronyms of records whose `domain` equals `domain` exactly.
    pub fn acronyms_by_domain(&self, domain: &str) -> Vec<&str> {
        self.records
            .iter()
            .filter(|record| record.get("domain").and_then(Value::as_str) == Some(domain))
            .filter_map(acronym_of)
            .collect()
    }
}

fn acronym_of(record: &Value) -> Option<&str> {
    record.get("acronym").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn sample() -> AgencyCatalog {
        AgencyCatalog::from_document(json!({
            "agencies": [
                {"acronym": "HHS", "tier": 1, "domain": "healthcare", "name": "Health"},
                {"acronym": "DOD", "tier": 1, "domain": "defense"},
                {"acronym": "CDC", "tier": 2, "domain": "healthcare"},
                {"name": "record without acronym", "tier": 2, "domain": "healthcare"},
                {"acronym": "NASA", "tier": "3", "domain": "science"},
                {"acronym": "NSF", "tier": 3.0, "domain": "science"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn find_is_exact_and_case_sensitive() {
        let catalog = sample();
        assert_eq!(catalog.find("HHS").unwrap()["domain"], "healthcare");
        assert!(catalog.find("hhs").is_none());
        assert!(catalog.find("HH").is_none());
        assert!(catalog.find("").is_none());
    }

    #[test]
    fn acronyms_keep_document_order() {
        let catalog = sample();
        assert_eq!(catalog.acronyms(), vec!["HHS", "DOD", "CDC", "NASA", "NSF"]);
        assert_eq!(catalog.len(), 6);
    }

    #[test]
    fn tier_filter_requires_integer_tier() {
        let catalog = sample();
        assert_eq!(catalog.acronyms_by_tier(1), vec!["HHS", "DOD"]);
        assert_eq!(catalog.acronyms_by_tier(2), vec!["CDC"]);
        // "3" is a string and 3.0 a float, neither is a tier
        assert!(catalog.acronyms_by_tier(3).is_empty());
        assert!(catalog.acronyms_by_tier(99).is_empty());
        assert!(catalog.acronyms_by_tier(-1).is_empty());
    }

    #[test]
    fn domain_filter_is_case_sensitive() {
        let catalog = sample();
        assert_eq!(catalog.acronyms_by_domain("healthcare"), vec!["HHS", "CDC"]);
        assert!(catalog.acronyms_by_domain("Healthcare").is_empty());
    }

    #[test]
    fn document_without_agencies_is_rejected() {
        let err = AgencyCatalog::from_document(json!({"agency": []})).unwrap_err();
        assert!(matches!(err, GatewayError::MissingAgencies));

        let err = AgencyCatalog::from_document(json!({"agencies": {"HHS": {}}})).unwrap_err();
        assert!(matches!(err, GatewayError::MissingAgencies));

        let err = AgencyCatalog::from_document(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, GatewayError::MissingAgencies));
    }

    #[test]
    fn load_reports_read_and_parse_failures() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("absent.json");
        let err = AgencyCatalog::load(&missing).unwrap_err();
        assert!(matches!(err, GatewayError::ConfigRead { .. }));
        assert!(err.is_config_error());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{\"agencies\": [").unwrap();
        let err = AgencyCatalog::load(&broken).unwrap_err();
        assert!(matches!(err, GatewayError::ConfigParse { .. }));
    }

    #[test]
    fn load_keeps_source_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"agencies": [{{"acronym": "VA", "tier": 4, "domain": "veterans"}}]}}"#)
            .unwrap();

        let catalog = AgencyCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.source(), Some(file.path()));
        assert!(catalog.contains("VA"));
    }
}
