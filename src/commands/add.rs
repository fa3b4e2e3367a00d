//! Add command implementation
//!
//! Registers a source: parses the argument, clones or copies it into the
//! cache, detects its assets and records everything in the registry.

use std::fs;

use console::Style;

use crate::alias;
use crate::cli::AddArgs;
use crate::common::fs::{CopyOptions, copy_dir_recursive};
use crate::detect;
use crate::error::{AgentryError, Result};
use crate::git;
use crate::registry::{Source, SourceOrigin};
use crate::source::SourceSpec;

use super::helpers;

/// Run add command
pub fn run(args: AddArgs) -> Result<()> {
    let (env, mut registry) = helpers::context()?;
    let spec = SourceSpec::parse(&args.source)?;

    if let SourceSpec::Remote { url, .. } = &spec {
        if let Some(existing) = registry.sources().iter().find(|s| {
            matches!(&s.origin, SourceOrigin::Remote { url: existing, .. } if existing == url)
        }) {
            return Err(AgentryError::SourceAlreadyRegistered {
                alias: existing.alias.clone(),
            });
        }
    }

    let origin = spec.origin();
    let alias = resolve_alias(&registry, &spec, &origin, args.alias.as_deref())?;

    let source_dir = env.source_dir(&alias);
    match &spec {
        SourceSpec::Remote { url, .. } => {
            git::clone(url, &source_dir)?;
        }
        SourceSpec::Local { path } => {
            copy_dir_recursive(path, &source_dir, &CopyOptions::exclude_git())?;
        }
    }

    let detected = detect::scan(&source_dir);
    let count = detected.len();

    registry.add_source(Source {
        alias: alias.clone(),
        origin,
        path: source_dir,
        assets: detected.into_assets(),
        updated_at: helpers::epoch_seconds(),
    });

    if let Err(e) = registry.save() {
        // Don't leave an orphaned cache directory behind a failed save
        let _ = fs::remove_dir_all(env.source_dir(&alias));
        return Err(e);
    }

    println!(
        "Registered {} ({} asset{})",
        Style::new().bold().yellow().apply_to(&alias),
        count,
        if count == 1 { "" } else { "s" }
    );
    if count == 0 {
        println!("  No agents, skills, commands or MCP configs were detected.");
    } else {
        println!("  Run 'agentry list --detailed' to see what was detected.");
    }

    Ok(())
}

/// Pick the alias: an explicit request must be free, otherwise the base
/// alias gets the smallest free numeric suffix.
fn resolve_alias(
    registry: &crate::registry::Registry,
    spec: &SourceSpec,
    origin: &SourceOrigin,
    requested: Option<&str>,
) -> Result<String> {
    if let Some(requested) = requested {
        let requested = alias::sanitize(requested);
        if registry.has_alias(&requested) {
            return Err(AgentryError::AliasTaken { alias: requested });
        }
        return Ok(requested);
    }

    let base = match spec {
        SourceSpec::Local { path } => alias::base_alias(origin, path),
        SourceSpec::Remote { .. } => alias::base_alias(origin, std::path::Path::new("")),
    };
    Ok(alias::allocate(&base, |a| registry.has_alias(a)))
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::env::Env;
    use tempfile::TempDir;

    fn empty_registry() -> (TempDir, Registry) {
        let temp = TempDir::new().expect("temp");
        let env = Env::from_roots(&temp.path().join("config"), &temp.path().join("target"));
        let registry = Registry::load(&env).expect("load");
        (temp, registry)
    }

    #[test]
    fn test_resolve_alias_prefers_requested() {
        let (_temp, registry) = empty_registry();
        let spec = SourceSpec::Remote {
            url: "https://github.com/octo/spoon.git".to_string(),
            owner: "octo".to_string(),
            repo: "spoon".to_string(),
        };
        let alias =
            resolve_alias(&registry, &spec, &spec.origin(), Some("My Alias")).expect("alias");
        assert_eq!(alias, "my-alias");
    }

    #[test]
    fn test_resolve_alias_rejects_taken_request() {
        let (temp, mut registry) = empty_registry();
        registry.add_source(Source {
            alias: "taken".to_string(),
            origin: SourceOrigin::Local,
            path: temp.path().to_path_buf(),
            assets: vec![],
            updated_at: 0,
        });
        let spec = SourceSpec::Local {
            path: temp.path().to_path_buf(),
        };
        let err = resolve_alias(&registry, &spec, &spec.origin(), Some("taken")).unwrap_err();
        assert!(matches!(err, AgentryError::AliasTaken { .. }));
    }

    #[test]
    fn test_resolve_alias_derives_remote_base() {
        let (_temp, registry) = empty_registry();
        let spec = SourceSpec::Remote {
            url: "https://github.com/octo/spoon.git".to_string(),
            owner: "octo".to_string(),
            repo: "spoon".to_string(),
        };
        let alias = resolve_alias(&registry, &spec, &spec.origin(), None).expect("alias");
        assert_eq!(alias, "octo.spoon");
    }
}
