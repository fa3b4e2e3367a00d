//! Update command implementation
//!
//! Refreshes one source or all of them: remote sources are fetched and
//! hard-reset, local sources only get their assets re-detected. A failure
//! on one source is reported and does not abort the rest.

use console::Style;

use crate::cli::UpdateArgs;
use crate::detect;
use crate::error::{AgentryError, Result};
use crate::git;
use crate::registry::{Registry, SourceOrigin};

use super::helpers;

/// Run update command
pub fn run(args: UpdateArgs) -> Result<()> {
    let (_env, mut registry) = helpers::context()?;

    let aliases: Vec<String> = match &args.alias {
        Some(alias) => {
            if !registry.has_alias(alias) {
                return Err(AgentryError::SourceNotFound {
                    alias: alias.clone(),
                });
            }
            vec![alias.clone()]
        }
        None => registry.sources().iter().map(|s| s.alias.clone()).collect(),
    };

    if aliases.is_empty() {
        println!("No sources registered.");
        return Ok(());
    }

    let mut failures = Vec::new();
    for alias in &aliases {
        match refresh_source(&mut registry, alias) {
            Ok(count) => println!(
                "Updated {} ({} asset{})",
                Style::new().bold().yellow().apply_to(alias),
                count,
                if count == 1 { "" } else { "s" }
            ),
            Err(e) => {
                eprintln!(
                    "{} {}: {e}",
                    Style::new().bold().red().apply_to("Failed"),
                    alias
                );
                failures.push(alias.clone());
            }
        }
    }

    registry.save()?;

    if !failures.is_empty() {
        return Err(AgentryError::GitOperationFailed {
            message: format!("{} source(s) failed to update", failures.len()),
        });
    }
    Ok(())
}

/// Refresh one source in place; returns the new asset count
fn refresh_source(registry: &mut Registry, alias: &str) -> Result<usize> {
    let source = registry
        .get_source(alias)
        .ok_or_else(|| AgentryError::SourceNotFound {
            alias: alias.to_string(),
        })?;
    let path = source.path.clone();

    if let SourceOrigin::Remote { .. } = source.origin {
        git::refresh(&path)?;
    }

    let detected = detect::scan(&path);
    let count = detected.len();
    registry.update_source_assets(alias, detected.into_assets(), helpers::epoch_seconds());
    Ok(count)
}
