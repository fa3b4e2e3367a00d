//! Alias derivation and allocation
//!
//! Aliases name sources in the registry and on disk (the cache subdirectory
//! and every link file name is alias-prefixed). The canonical form is
//! dotted: `owner.repo` for remote sources, `local.<dirname>` for local
//! ones. Short dot-less aliases issued by old versions are recognized by
//! [`is_legacy_alias`] and rewritten at registry load time.

use std::path::Path;

use crate::registry::SourceOrigin;

/// Characters kept verbatim in an alias; everything else collapses to `-`
fn is_alias_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-')
}

/// Lowercase a name and replace path-unsafe characters with hyphens.
///
/// Consecutive hyphens are collapsed and leading/trailing hyphens removed.
/// Returns "unknown" if nothing survives.
pub fn sanitize(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mapped: String = lowered
        .chars()
        .map(|c| if is_alias_char(c) { c } else { '-' })
        .collect();

    let collapsed = mapped
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if collapsed.is_empty() {
        "unknown".to_string()
    } else {
        collapsed
    }
}

/// Deterministic base alias for a source identity.
///
/// Remote sources use `owner.repo`; local sources have no external identity
/// and use `local.<dirname>` derived from their directory. Both forms
/// always contain a dot, keeping them outside the legacy pattern.
pub fn base_alias(origin: &SourceOrigin, dir: &Path) -> String {
    match origin {
        SourceOrigin::Remote { owner, repo, .. } => {
            format!("{}.{}", sanitize(owner), sanitize(repo))
        }
        SourceOrigin::Local => {
            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            format!("local.{}", sanitize(&name))
        }
    }
}

/// Resolve a base alias against already-taken aliases.
///
/// Returns the base itself when free, otherwise appends the smallest
/// integer >= 2 that yields an unused alias.
pub fn allocate(base: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(base) {
        return base.to_string();
    }
    let mut n = 2u32;
    loop {
        let candidate = format!("{base}{n}");
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// True for short aliases issued by old versions: 1-4 lowercase letters
/// optionally followed by digits, with no separator character.
pub fn is_legacy_alias(alias: &str) -> bool {
    let letters = alias
        .chars()
        .take_while(|c| c.is_ascii_lowercase())
        .count();
    (1..=4).contains(&letters) && alias[letters..].chars().all(|c| c.is_ascii_digit())
}
