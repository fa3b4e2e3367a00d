//! Status command implementation
//!
//! Read-only diagnosis of every link: healthy links are counted, broken
//! ones listed with their reason. Never modifies the registry or the
//! filesystem.

use console::Style;

use crate::error::Result;
use crate::links;

use super::helpers;

/// Run status command
pub fn run() -> Result<()> {
    let (_env, registry) = helpers::context()?;
    let diagnosis = links::diagnose(&registry);

    if diagnosis.healthy.is_empty() && diagnosis.broken.is_empty() {
        println!("No assets linked.");
        return Ok(());
    }

    println!(
        "{} healthy link{}",
        Style::new().bold().green().apply_to(diagnosis.healthy.len()),
        if diagnosis.healthy.len() == 1 { "" } else { "s" }
    );

    if diagnosis.broken.is_empty() {
        return Ok(());
    }

    println!(
        "{} broken link{}:",
        Style::new().bold().red().apply_to(diagnosis.broken.len()),
        if diagnosis.broken.len() == 1 { "" } else { "s" }
    );
    for broken in &diagnosis.broken {
        println!(
            "  {} {} ({})",
            Style::new().red().apply_to(broken.reason.as_str()),
            broken.selection.link_path.display(),
            broken.selection.source
        );
    }
    println!();
    println!("Run 'agentry cure' to remove broken links and their records.");

    Ok(())
}
