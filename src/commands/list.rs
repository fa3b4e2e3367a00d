//! List command implementation
//!
//! Lists registered sources with their origins, asset counts and link
//! state; `--detailed` adds a per-asset line with its kind and path.

use console::Style;

use crate::cli::ListArgs;
use crate::error::Result;
use crate::frontmatter;
use crate::registry::{Asset, AssetKind, Registry, Source, SourceOrigin};

use super::helpers;

/// Run list command
pub fn run(args: ListArgs) -> Result<()> {
    let (_env, registry) = helpers::context()?;

    if registry.sources().is_empty() {
        println!("No sources registered.");
        println!("Run 'agentry add <source>' to register one.");
        return Ok(());
    }

    println!("Registered sources ({}):", registry.sources().len());
    println!();
    for source in registry.sources() {
        display_source(&registry, source, args.detailed);
        println!();
    }

    let staged = registry.staged_entries().len();
    if staged > 0 {
        println!(
            "{} staged MCP server entr{} pending. Run 'agentry mcp sync' to merge.",
            staged,
            if staged == 1 { "y" } else { "ies" }
        );
    }

    Ok(())
}

fn display_source(registry: &Registry, source: &Source, detailed: bool) {
    println!(
        "  {}",
        Style::new().bold().yellow().apply_to(&source.alias)
    );
    match &source.origin {
        SourceOrigin::Remote { url, .. } => {
            println!("    {} {}", Style::new().bold().apply_to("Origin:"), url);
        }
        SourceOrigin::Local => {
            println!(
                "    {} local ({})",
                Style::new().bold().apply_to("Origin:"),
                source.path.display()
            );
        }
    }

    let linked = registry.selections_for_source(&source.alias).len();
    println!(
        "    {} {} detected, {} linked",
        Style::new().bold().apply_to("Assets:"),
        source.assets.len(),
        linked
    );

    if detailed {
        for asset in &source.assets {
            let marker = if registry
                .selections_for_source(&source.alias)
                .iter()
                .any(|s| s.path == asset.path)
            {
                Style::new().green().apply_to("linked").to_string()
            } else {
                String::new()
            };
            println!(
                "      {:<10} {} {}",
                Style::new().cyan().apply_to(asset.kind.label()),
                asset.path,
                marker
            );
            if let Some(description) = asset_description(source, asset) {
                println!("                 {}", Style::new().dim().apply_to(description));
            }
        }
    }
}

/// Description from the asset file's frontmatter, when it has one
fn asset_description(source: &Source, asset: &Asset) -> Option<String> {
    if asset.kind == AssetKind::McpConfig {
        return None;
    }
    let content = std::fs::read_to_string(source.path.join(&asset.path)).ok()?;
    let (fm, _) = frontmatter::parse_frontmatter_and_body(&content)?;
    frontmatter::get_str(&fm, "description")
}
