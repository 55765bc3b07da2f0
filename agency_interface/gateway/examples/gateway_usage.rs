// examples/gateway_usage.rs
//
// Walks through the gateway lookups against a throwaway agency tree

use gateway::{AssetKind, Gateway, GatewayConfig, GatewayError, IssueVerdict};
use std::fs;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Agency Gateway Usage Examples ===\n");

    let dir = tempfile::tempdir()?;
    seed_tree(dir.path())?;
    let gateway = Gateway::new(GatewayConfig::rooted_at(dir.path()));

    // Example 1: Record lookups
    record_lookups(&gateway)?;

    // Example 2: Listings
    listings(&gateway)?;

    // Example 3: Assets
    assets(&gateway)?;

    // Example 4: Issue verification
    issue_verification(&gateway)?;

    println!("\n=== All Examples Completed Successfully ===");
    Ok(())
}

fn seed_tree(root: &Path) -> std::io::Result<()> {
    let config = GatewayConfig::rooted_at(root);
    fs::create_dir_all(root.join("config"))?;
    fs::write(
        &config.config_file,
        r#"{
  "agencies": [
    {"acronym": "HHS", "name": "Health and Human Services", "tier": 1, "domain": "healthcare"},
    {"acronym": "EPA", "name": "Environmental Protection", "tier": 2, "domain": "environment"},
    {"acronym": "CDC", "name": "Centers for Disease Control", "tier": 3, "domain": "healthcare"}
  ]
}"#,
    )?;
    fs::create_dir_all(&config.templates_dir)?;
    fs::write(config.templates_dir.join("hhs_ascii.txt"), "[ H H S ]\n")?;
    Ok(())
}

// ============================================================================
// Example 1: Record Lookups
// ============================================================================

fn record_lookups(gateway: &Gateway) -> Result<(), GatewayError> {
    println!("--- Example 1: Record Lookups ---");

    println!("HHS context:\n{}", gateway.context("HHS")?);

    let info = gateway.agency_info("EPA")?;
    println!("EPA is tier {} in {}", info.tier, info.domain);

    match gateway.context("hhs") {
        Err(GatewayError::AgencyNotFound(acronym)) => {
            println!("'{}' not found (acronyms are case-sensitive)", acronym)
        }
        other => println!("unexpected: {:?}", other),
    }
    Ok(())
}

// ============================================================================
// Example 2: Listings
// ============================================================================

fn listings(gateway: &Gateway) -> Result<(), GatewayError> {
    println!("\n--- Example 2: Listings ---");

    println!("All: {}", gateway.all_agencies()?);
    println!("Tier 3: {:?}", gateway.acronyms_by_tier(3)?);
    println!("Tier 99: {}", gateway.agencies_by_tier(99)?);
    println!("healthcare: {:?}", gateway.acronyms_by_domain("healthcare")?);
    Ok(())
}

// ============================================================================
// Example 3: Assets
// ============================================================================

fn assets(gateway: &Gateway) -> Result<(), GatewayError> {
    println!("\n--- Example 3: Assets ---");

    print!("{}", gateway.ascii_art("HHS")?);

    for kind in AssetKind::ALL {
        match gateway.asset(kind, "EPA") {
            Ok(text) => println!("EPA {}: {} bytes", kind, text.len()),
            Err(e) => println!("EPA {}: {}", kind, e),
        }
    }
    Ok(())
}

// ============================================================================
// Example 4: Issue Verification
// ============================================================================

fn issue_verification(gateway: &Gateway) -> Result<(), GatewayError> {
    println!("\n--- Example 4: Issue Verification ---");

    let complete = r#"{
        "id": 7,
        "title": "Clinic backlog",
        "description": "Wait times",
        "affected_areas": ["rural"]
    }"#;
    let partial = r#"{"id": 8, "title": "Draft"}"#;

    for issue in [complete, partial] {
        match gateway.verify_issue("HHS", issue)? {
            IssueVerdict::Valid => println!("valid: {}", issue),
            IssueVerdict::Invalid { missing } => println!("invalid, missing {:?}", missing),
        }
    }

    if let Err(e) = gateway.verify_issue("HHS", "{not json") {
        println!("error: {}", e);
    }
    Ok(())
}
