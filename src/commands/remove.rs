//! Remove command implementation
//!
//! Removing a source cascades: every link materialized from it is removed
//! along with its selection record, its staged MCP entries are dropped and
//! the cached directory is deleted.

use std::fs;

use console::Style;

use crate::cli::RemoveArgs;
use crate::error::{AgentryError, Result};
use crate::links;

use super::helpers;

/// Run remove command
pub fn run(args: RemoveArgs) -> Result<()> {
    let (env, mut registry) = helpers::context()?;

    let Some((source, selections)) = registry.remove_source(&args.alias) else {
        return Err(AgentryError::SourceNotFound {
            alias: args.alias.clone(),
        });
    };

    let mut removed_links = 0;
    for selection in &selections {
        match links::remove_link_files(selection) {
            Ok(()) => removed_links += 1,
            Err(e) => eprintln!("warning: {e}"),
        }
    }

    // The cache dir is only ours when it sits under the sources root
    if source.path.starts_with(&env.sources_root) && source.path.exists() {
        if let Err(e) = fs::remove_dir_all(&source.path) {
            eprintln!(
                "warning: could not remove {}: {e}",
                source.path.display()
            );
        }
    }

    registry.save()?;

    println!(
        "Removed {} ({} link{})",
        Style::new().bold().yellow().apply_to(&source.alias),
        removed_links,
        if removed_links == 1 { "" } else { "s" }
    );

    Ok(())
}
