//! Cure command implementation

use console::Style;

use crate::error::Result;
use crate::links;

use super::helpers;

/// Run cure command
pub fn run() -> Result<()> {
    let (_env, mut registry) = helpers::context()?;
    let report = links::cure(&mut registry);

    registry.save()?;

    if report.fixed == 0 && report.errors.is_empty() {
        println!("All links healthy, nothing to cure.");
        return Ok(());
    }

    println!(
        "Removed {} broken link{}",
        Style::new().bold().green().apply_to(report.fixed),
        if report.fixed == 1 { "" } else { "s" }
    );
    for (path, reason) in &report.errors {
        eprintln!(
            "{} {}: {reason}",
            Style::new().bold().red().apply_to("Failed"),
            path.display()
        );
    }

    Ok(())
}
