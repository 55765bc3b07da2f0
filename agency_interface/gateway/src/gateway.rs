use log::{debug, error, info};
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::agency::Agency;
use crate::assets::{into_text, read_asset_bytes, AssetKind};
use crate::catalog::AgencyCatalog;
use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::verify::{self, IssueVerdict};

// ================================================================================================
// GATEWAY STRUCTURE
// ================================================================================================

/// Entry point for every agency lookup.
///
/// Owns the path configuration and a lazily loaded catalog. The catalog is
/// read from disk at most once per gateway: concurrent first callers are
/// serialized on the write lock and re-check the slot before loading. A
/// failed load leaves the slot empty so the next call tries again.
#[derive(Debug)]
pub struct Gateway {
    config: GatewayConfig,
    catalog: RwLock<Option<Arc<AgencyCatalog>>>,
    loads: AtomicU64,
}

impl Gateway {
    /// Creates a gateway; nothing is read until the first lookup.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            catalog: RwLock::new(None),
            loads: AtomicU64::new(0),
        }
    }

    /// Creates a gateway from `AGENCY_*` environment overrides.
    pub fn from_env() -> Self {
        Self::new(GatewayConfig::from_env())
    }

    /// Creates a gateway and loads its catalog immediately.
    pub fn preloaded(config: GatewayConfig) -> Result<Self> {
        let gateway = Self::new(config);
        gateway.catalog()?;
        Ok(gateway)
    }

    // ============================================================================================
    // ACCESSORS
    // ============================================================================================

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Whether a catalog is currently cached.
    pub fn is_loaded(&self) -> bool {
        self.catalog.read().is_some()
    }

    /// Number of successful catalog loads. Stays at 1 once loaded.
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::Acquire)
    }

    /// Returns the cached catalog, loading it on first use.
    pub fn catalog(&self) -> Result<Arc<AgencyCatalog>> {
        if let Some(catalog) = self.catalog.read().as_ref() {
            return Ok(Arc::clone(catalog));
        }

        let mut slot = self.catalog.write();
        if let Some(catalog) = slot.as_ref() {
            return Ok(Arc::clone(catalog));
        }

        let path = &self.config.config_file;
        match AgencyCatalog::load(path) {
            Ok(catalog) => {
                info!(
                    "Loaded agency catalog from {}: {} records",
                    path.display(),
                    catalog.len()
                );
                let catalog = Arc::new(catalog);
                *slot = Some(Arc::clone(&catalog));
                self.loads.fetch_add(1, Ordering::AcqRel);
                Ok(catalog)
            }
            Err(e) => {
                error!("Error loading configuration file {}: {}", path.display(), e);
                Err(e)
            }
        }
    }

    // ============================================================================================
    // RECORD LOOKUPS
    // ============================================================================================

    /// Owned copy of the record for `acronym`.
    pub fn record(&self, acronym: &str) -> Result<Value> {
        let catalog = self.catalog()?;
        catalog
            .find(acronym)
            .cloned()
            .ok_or_else(|| GatewayError::AgencyNotFound(acronym.to_string()))
    }

    /// The full record for `acronym` as pretty-printed JSON.
    pub fn context(&self, acronym: &str) -> Result<String> {
        let catalog = self.catalog()?;
        let record = catalog
            .find(acronym)
            .ok_or_else(|| GatewayError::AgencyNotFound(acronym.to_string()))?;
        to_pretty_json(record)
    }

    /// Typed projection of the record for `acronym`.
    pub fn agency_info(&self, acronym: &str) -> Result<Agency> {
        let catalog = self.catalog()?;
        let record = catalog
            .find(acronym)
            .ok_or_else(|| GatewayError::AgencyNotFound(acronym.to_string()))?;
        Agency::from_record(record)
    }

    // ============================================================================================
    // LISTINGS
    // ============================================================================================

    /// Every acronym in catalog order.
    pub fn all_acronyms(&self) -> Result<Vec<String>> {
        let catalog = self.catalog()?;
        Ok(owned(catalog.acronyms()))
    }

    pub fn acronyms_by_tier(&self, tier: i64) -> Result<Vec<String>> {
        let catalog = self.catalog()?;
        Ok(owned(catalog.acronyms_by_tier(tier)))
    }

    pub fn acronyms_by_domain(&self, domain: &str) -> Result<Vec<String>> {
        let catalog = self.catalog()?;
        Ok(owned(catalog.acronyms_by_domain(domain)))
    }

    /// Pretty JSON array of every acronym.
    pub fn all_agencies(&self) -> Result<String> {
        to_pretty_json(&self.all_acronyms()?)
    }

    /// Pretty JSON array of acronyms in `tier`; `[]` when nothing matches.
    pub fn agencies_by_tier(&self, tier: i64) -> Result<String> {
        to_pretty_json(&self.acronyms_by_tier(tier)?)
    }

    /// Pretty JSON array of acronyms in `domain`; `[]` when nothing matches.
    pub fn agencies_by_domain(&self, domain: &str) -> Result<String> {
        to_pretty_json(&self.acronyms_by_domain(domain)?)
    }

    // ============================================================================================
    // ASSETS
    // ============================================================================================

    /// Reads an asset for `acronym` as raw bytes.
    ///
    /// The read does not depend on the catalog: a file present for an acronym
    /// the catalog lacks is still returned. When the file is missing, the
    /// catalog is consulted only to report `AgencyNotFound` instead of
    /// `AssetNotFound` for acronyms it does not know.
    pub fn asset_bytes(&self, kind: AssetKind, acronym: &str) -> Result<Vec<u8>> {
        match read_asset_bytes(&self.config, kind, acronym) {
            Err(GatewayError::AssetNotFound { path }) => {
                let unknown = self
                    .catalog()
                    .map(|catalog| !catalog.contains(acronym))
                    .unwrap_or(false);
                if unknown {
                    Err(GatewayError::AgencyNotFound(acronym.to_string()))
                } else {
                    Err(GatewayError::AssetNotFound { path })
                }
            }
            other => other,
        }
    }

    /// Text form of [`Gateway::asset_bytes`]; invalid UTF-8 is replaced
    /// with U+FFFD.
    pub fn asset(&self, kind: AssetKind, acronym: &str) -> Result<String> {
        self.asset_bytes(kind, acronym).map(into_text)
    }

    pub fn issue_finder(&self, acronym: &str) -> Result<String> {
        self.asset(AssetKind::IssueFinder, acronym)
    }

    pub fn research_connector(&self, acronym: &str) -> Result<String> {
        self.asset(AssetKind::ResearchConnector, acronym)
    }

    pub fn ascii_art(&self, acronym: &str) -> Result<String> {
        self.asset(AssetKind::AsciiArt, acronym)
    }

    // ============================================================================================
    // VERIFICATION
    // ============================================================================================

    /// Key-presence check of `issue_json`. `agency` is recorded in the log
    /// only; the check is the same for every agency.
    pub fn verify_issue(&self, agency: &str, issue_json: &str) -> Result<IssueVerdict> {
        let verdict = verify::verify_issue(issue_json)?;
        debug!("Issue verification for {}: {:?}", agency, verdict);
        Ok(verdict)
    }
}

fn owned(acronyms: Vec<&str>) -> Vec<String> {
    acronyms.into_iter().map(str::to_owned).collect()
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(GatewayError::Serialize)
}
