//! # Agency Gateway
//!
//! Lookups into the static agency knowledge base: a JSON catalog of agency
//! records plus per-agency text assets (issue-finder and research-connector
//! scripts, ASCII art), and a shallow issue payload check.

pub mod agency;
pub mod assets;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod verify;

pub use agency::Agency;
pub use assets::{asset_path, AssetKind};
pub use catalog::AgencyCatalog;
pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use gateway::Gateway;
pub use verify::{IssueVerdict, REQUIRED_ISSUE_FIELDS};
