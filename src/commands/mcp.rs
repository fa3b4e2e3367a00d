//! MCP command group implementation
//!
//! Thin wrappers over the staging/merge layer: stage and unstage mutate
//! the staged set, servers and preview are read-only, sync writes the
//! merged output file.

use console::Style;

use crate::cli::{McpArgs, McpSubcommand};
use crate::error::{AgentryError, Result};
use crate::mcp;
use crate::registry::Registry;

use super::helpers;

/// Run mcp command
pub fn run(args: McpArgs) -> Result<()> {
    match args.command {
        McpSubcommand::Stage {
            alias,
            bundle,
            servers,
        } => stage(&alias, &bundle, servers),
        McpSubcommand::Unstage {
            alias,
            bundle,
            servers,
        } => unstage(&alias, &bundle, servers),
        McpSubcommand::Servers { alias, bundle } => servers(&alias, &bundle),
        McpSubcommand::Preview => preview(),
        McpSubcommand::Sync => sync(),
    }
}

/// Expand an empty server list to every entry the bundle defines
fn resolve_servers(
    registry: &Registry,
    alias: &str,
    bundle: &str,
    servers: Vec<String>,
) -> Result<Vec<String>> {
    if !servers.is_empty() {
        return Ok(servers);
    }
    let source = registry
        .get_source(alias)
        .ok_or_else(|| AgentryError::SourceNotFound {
            alias: alias.to_string(),
        })?;
    Ok(mcp::server_names(&source.path.join(bundle)))
}

fn stage(alias: &str, bundle: &str, servers: Vec<String>) -> Result<()> {
    let (_env, mut registry) = helpers::context()?;
    let servers = resolve_servers(&registry, alias, bundle, servers)?;

    // Validates the bundle even when the expansion came up empty
    let report = mcp::stage(&mut registry, alias, bundle, &servers)?;
    registry.save()?;

    if servers.is_empty() {
        println!("No server entries found in {bundle}.");
        return Ok(());
    }

    for name in &report.changed {
        println!("Staged {}", Style::new().bold().yellow().apply_to(name));
    }
    for name in &report.unchanged {
        println!("{name} was already staged");
    }
    if !report.changed.is_empty() {
        println!("Run 'agentry mcp sync' to merge staged entries.");
    }
    Ok(())
}

fn unstage(alias: &str, bundle: &str, servers: Vec<String>) -> Result<()> {
    let (_env, mut registry) = helpers::context()?;
    let servers = if servers.is_empty() {
        // All staged entries of this bundle
        registry
            .staged_entries_for(alias, bundle)
            .into_iter()
            .map(|e| e.server.clone())
            .collect()
    } else {
        servers
    };

    let report = mcp::unstage(&mut registry, alias, bundle, &servers)?;
    registry.save()?;

    for name in &report.changed {
        println!("Unstaged {}", Style::new().bold().yellow().apply_to(name));
    }
    for name in &report.unchanged {
        println!("{name} was not staged");
    }
    Ok(())
}

fn servers(alias: &str, bundle: &str) -> Result<()> {
    let (_env, registry) = helpers::context()?;
    let source = registry
        .get_source(alias)
        .ok_or_else(|| AgentryError::SourceNotFound {
            alias: alias.to_string(),
        })?;

    let names = mcp::server_names(&source.path.join(bundle));
    if names.is_empty() {
        println!("No server entries found in {bundle}.");
        return Ok(());
    }
    println!("Server entries in {bundle}:");
    for name in names {
        let marker = if registry.is_staged(alias, bundle, &name) {
            Style::new().green().apply_to(" (staged)").to_string()
        } else {
            String::new()
        };
        println!("  {name}{marker}");
    }
    Ok(())
}

fn preview() -> Result<()> {
    let (env, registry) = helpers::context()?;
    let planned = mcp::preview(&registry);

    if planned.is_empty() {
        println!("Nothing staged.");
    } else {
        println!("Staged for the next sync:");
        for entry in &planned {
            println!(
                "  {} {}",
                Style::new().bold().yellow().apply_to(&entry.server),
                Style::new()
                    .dim()
                    .apply_to(format!("({} / {})", entry.source, entry.bundle_file))
            );
        }
    }

    let existing = mcp::existing_output_servers(&env);
    if !existing.is_empty() {
        println!();
        println!(
            "Already in {}: {}",
            env.mcp_output.display(),
            existing.join(", ")
        );
    }
    Ok(())
}

fn sync() -> Result<()> {
    let (env, mut registry) = helpers::context()?;

    if registry.staged_entries().is_empty() {
        println!("Nothing staged, output file left untouched.");
        return Ok(());
    }

    let report = mcp::sync(&env, &mut registry)?;
    registry.save()?;

    println!(
        "Wrote {} server entr{} to {}",
        Style::new().bold().green().apply_to(report.written),
        if report.written == 1 { "y" } else { "ies" },
        report.output.display()
    );
    for skipped in &report.skipped {
        eprintln!("{} {skipped}", Style::new().bold().red().apply_to("Skipped"));
    }
    Ok(())
}
