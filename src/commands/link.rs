//! Link command implementation
//!
//! Links one or more assets of a source into the target directory. Each
//! path is attempted independently; the registry is saved once at the end
//! so successful links survive a later failure in the batch.

use console::Style;

use crate::cli::LinkArgs;
use crate::error::{AgentryError, Result};
use crate::links;

use super::helpers;

/// Run link command
pub fn run(args: LinkArgs) -> Result<()> {
    let (env, mut registry) = helpers::context()?;

    let mut failures = Vec::new();
    for path in &args.paths {
        match links::link(&env, &mut registry, &args.alias, path) {
            Ok(selection) => println!(
                "Linked {} {} {}",
                path,
                Style::new().dim().apply_to("->"),
                Style::new().green().apply_to(selection.link_path.display())
            ),
            Err(e) => {
                eprintln!("{} {path}: {e}", Style::new().bold().red().apply_to("Failed"));
                failures.push(path.clone());
            }
        }
    }

    registry.save()?;

    if !failures.is_empty() {
        return Err(AgentryError::LinkCreateFailed {
            path: failures.join(", "),
            reason: format!("{} of {} failed", failures.len(), args.paths.len()),
        });
    }
    Ok(())
}
