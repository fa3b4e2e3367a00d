//! Unlink command implementation
//!
//! Each path is attempted independently; the registry is saved once at the
//! end so successful removals survive a later failure in the batch.

use console::Style;

use crate::cli::UnlinkArgs;
use crate::error::{AgentryError, Result};
use crate::links;

use super::helpers;

/// Run unlink command
pub fn run(args: UnlinkArgs) -> Result<()> {
    let (_env, mut registry) = helpers::context()?;

    let mut failures = Vec::new();
    for path in &args.paths {
        match links::unlink(&mut registry, &args.alias, path) {
            Ok(Some(_)) => println!("Unlinked {}", Style::new().yellow().apply_to(path)),
            Ok(None) => println!("{path} was not linked, nothing to do"),
            Err(e) => {
                eprintln!("{} {path}: {e}", Style::new().bold().red().apply_to("Failed"));
                failures.push(path.clone());
            }
        }
    }

    registry.save()?;

    if !failures.is_empty() {
        return Err(AgentryError::LinkRemoveFailed {
            path: failures.join(", "),
            reason: format!("{} of {} failed", failures.len(), args.paths.len()),
        });
    }
    Ok(())
}
