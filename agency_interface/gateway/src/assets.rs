// Companion text assets keyed by lowercased agency acronym.

use log::{debug, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};

/// The three asset families stored next to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Python issue-finder script
    IssueFinder,
    /// Python research-connector script
    ResearchConnector,
    /// ASCII art banner
    AsciiArt,
}

impl AssetKind {
    pub const ALL: [AssetKind; 3] = [
        AssetKind::IssueFinder,
        AssetKind::ResearchConnector,
        AssetKind::AsciiArt,
    ];

    /// Filename suffix appended to the lowercased acronym.
    pub fn suffix(self) -> &'static str {
        match self {
            AssetKind::IssueFinder => "_finder.py",
            AssetKind::ResearchConnector => "_connector.py",
            AssetKind::AsciiArt => "_ascii.txt",
        }
    }

    fn directory(self, config: &GatewayConfig) -> &Path {
        match self {
            AssetKind::IssueFinder => config.issue_finder_dir.as_path(),
            AssetKind::ResearchConnector => config.connector_dir.as_path(),
            AssetKind::AsciiArt => config.templates_dir.as_path(),
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AssetKind::IssueFinder => "issue finder",
            AssetKind::ResearchConnector => "research connector",
            AssetKind::AsciiArt => "ascii art",
        };
        f.write_str(name)
    }
}

/// `<dir>/<lowercased acronym><suffix>`. Only ASCII letters are folded.
pub fn asset_path(config: &GatewayConfig, kind: AssetKind, acronym: &str) -> PathBuf {
    let file_name = format!("{}{}", acronym.to_ascii_lowercase(), kind.suffix());
    kind.directory(config).join(file_name)
}

/// Reads a whole asset file as raw bytes. A missing file maps to
/// `AssetNotFound`; any other I/O failure to `AssetRead`. The content is not
/// required to be UTF-8.
pub fn read_asset_bytes(
    config: &GatewayConfig,
    kind: AssetKind,
    acronym: &str,
) -> Result<Vec<u8>> {
    let path = asset_path(config, kind, acronym);
    debug!("Resolving {} for {} at {}", kind, acronym, path.display());

    match std::fs::read(&path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(GatewayError::AssetNotFound { path }),
        Err(source) => {
            warn!("Error reading file {}: {}", path.display(), source);
            Err(GatewayError::AssetRead { path, source })
        }
    }
}

/// Text form of [`read_asset_bytes`]. Invalid UTF-8 sequences are replaced
/// with U+FFFD rather than failing the read.
pub fn read_asset(config: &GatewayConfig, kind: AssetKind, acronym: &str) -> Result<String> {
    let bytes = read_asset_bytes(config, kind, acronym)?;
    Ok(into_text(bytes))
}

pub(crate) fn into_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}
