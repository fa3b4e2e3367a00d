//! Symlink lifecycle for selected assets
//!
//! Linking materializes an agent/command as `<alias>-<basename>` under the
//! kind's target root, and a skill as a `<alias>-<name>` directory holding
//! a single `SKILL.md` symlink. Relinking replaces the destination.
//! `diagnose` classifies every selection as healthy or broken with a
//! reason; `cure` removes broken links and their records, continuing past
//! per-entry failures.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::env::Env;
use crate::error::{AgentryError, Result};
use crate::registry::{Asset, AssetKind, Registry, Selection};

/// Why a selection failed diagnosis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrokenReason {
    /// The link path no longer exists
    BrokenSymlink,
    /// Something that is not a symlink occupies the link path
    NotASymlink,
    /// The owning source is no longer registered
    UnknownSource,
    /// The asset's file is gone from the source directory
    MissingSource,
}

impl BrokenReason {
    pub fn as_str(self) -> &'static str {
        match self {
            BrokenReason::BrokenSymlink => "broken_symlink",
            BrokenReason::NotASymlink => "not_a_symlink",
            BrokenReason::UnknownSource => "unknown_source",
            BrokenReason::MissingSource => "missing_source",
        }
    }
}

impl fmt::Display for BrokenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selection that failed diagnosis
#[derive(Debug, Clone)]
pub struct BrokenLink {
    pub selection: Selection,
    pub reason: BrokenReason,
}

/// Partition of all selections into healthy and broken
#[derive(Debug, Default)]
pub struct Diagnosis {
    pub healthy: Vec<Selection>,
    pub broken: Vec<BrokenLink>,
}

/// Outcome of a cure pass
#[derive(Debug, Default)]
pub struct CureReport {
    pub fixed: usize,
    /// (link path, failure) pairs for entries that could not be cleaned
    pub errors: Vec<(PathBuf, String)>,
}

/// Materialize one asset as a symlink and record the selection.
///
/// Fails when the source or asset is unknown, when the asset's file is
/// missing on disk, or when the asset is an MCP config bundle (those are
/// merged via staging, never linked).
pub fn link(env: &Env, registry: &mut Registry, alias: &str, asset_path: &str) -> Result<Selection> {
    let source = registry
        .get_source(alias)
        .ok_or_else(|| AgentryError::SourceNotFound {
            alias: alias.to_string(),
        })?;
    let asset = source
        .asset(asset_path)
        .cloned()
        .ok_or_else(|| AgentryError::AssetNotFound {
            alias: alias.to_string(),
            path: asset_path.to_string(),
        })?;
    if asset.kind == AssetKind::McpConfig {
        return Err(AgentryError::AssetNotLinkable {
            path: asset_path.to_string(),
        });
    }

    let target_file = source.path.join(&asset.path);
    if !target_file.exists() {
        return Err(AgentryError::AssetNotFound {
            alias: alias.to_string(),
            path: asset_path.to_string(),
        });
    }

    let link_path = link_destination(env, alias, &asset)?;
    create_symlink(&target_file, &link_path)?;

    let selection = Selection {
        source: alias.to_string(),
        path: asset.path.clone(),
        kind: asset.kind,
        link_path,
    };
    registry.add_selection(selection.clone());
    Ok(selection)
}

/// Remove a selection and its symlink. `Ok(None)` signals that no matching
/// selection existed (a no-op, not an error). When the link file cannot be
/// removed the selection record stays, so the entry remains visible to
/// `diagnose` and a later cure or retry.
pub fn unlink(registry: &mut Registry, alias: &str, asset_path: &str) -> Result<Option<Selection>> {
    let Some(selection) = registry.remove_selection(alias, asset_path) else {
        return Ok(None);
    };
    if let Err(e) = remove_link_files(&selection) {
        registry.add_selection(selection);
        return Err(e);
    }
    Ok(Some(selection))
}

/// Classify every linkable selection as healthy or broken
pub fn diagnose(registry: &Registry) -> Diagnosis {
    let mut diagnosis = Diagnosis::default();
    for selection in registry.selections() {
        if selection.kind == AssetKind::McpConfig {
            continue;
        }
        match check_selection(registry, selection) {
            Some(reason) => diagnosis.broken.push(BrokenLink {
                selection: selection.clone(),
                reason,
            }),
            None => diagnosis.healthy.push(selection.clone()),
        }
    }
    diagnosis
}

/// Remove every broken link and its selection record.
///
/// A failure on one entry is reported and does not abort the rest.
pub fn cure(registry: &mut Registry) -> CureReport {
    let mut report = CureReport::default();
    for broken in diagnose(registry).broken {
        let selection = broken.selection;
        match remove_link_files(&selection) {
            Ok(()) => {
                registry.remove_selection(&selection.source, &selection.path);
                report.fixed += 1;
            }
            Err(e) => report.errors.push((selection.link_path.clone(), e.to_string())),
        }
    }
    report
}

fn check_selection(registry: &Registry, selection: &Selection) -> Option<BrokenReason> {
    match selection.link_path.symlink_metadata() {
        Err(_) => return Some(BrokenReason::BrokenSymlink),
        Ok(meta) if !meta.file_type().is_symlink() => return Some(BrokenReason::NotASymlink),
        Ok(_) => {}
    }
    let Some(source) = registry.get_source(&selection.source) else {
        return Some(BrokenReason::UnknownSource);
    };
    if !source.path.join(&selection.path).exists() {
        return Some(BrokenReason::MissingSource);
    }
    None
}

/// Compute where an asset's link lives under the target root
fn link_destination(env: &Env, alias: &str, asset: &Asset) -> Result<PathBuf> {
    let root = env
        .link_root(asset.kind)
        .ok_or_else(|| AgentryError::AssetNotLinkable {
            path: asset.path.clone(),
        })?;
    match asset.kind {
        AssetKind::Skill => Ok(root.join(format!("{alias}-{}", asset.name)).join("SKILL.md")),
        AssetKind::Agent | AssetKind::Command => {
            let basename = Path::new(&asset.path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| asset.name.clone());
            Ok(root.join(format!("{alias}-{basename}")))
        }
        AssetKind::McpConfig => Err(AgentryError::AssetNotLinkable {
            path: asset.path.clone(),
        }),
    }
}

/// Create the symlink, replacing any pre-existing one at the destination
fn create_symlink(target: &Path, link_path: &Path) -> Result<()> {
    if let Some(parent) = link_path.parent() {
        fs::create_dir_all(parent).map_err(|e| AgentryError::LinkCreateFailed {
            path: link_path.display().to_string(),
            reason: e.to_string(),
        })?;
    }
    if link_path.symlink_metadata().is_ok() {
        fs::remove_file(link_path).map_err(|e| AgentryError::LinkCreateFailed {
            path: link_path.display().to_string(),
            reason: e.to_string(),
        })?;
    }
    symlink_file(target, link_path).map_err(|e| AgentryError::LinkCreateFailed {
        path: link_path.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(unix)]
fn symlink_file(target: &Path, link_path: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link_path)
}

#[cfg(windows)]
fn symlink_file(target: &Path, link_path: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, link_path)
}

/// Remove a selection's link file; for skills also the containing
/// directory, tolerating a non-empty or already-gone directory.
pub fn remove_link_files(selection: &Selection) -> Result<()> {
    if selection.link_path.symlink_metadata().is_ok() {
        fs::remove_file(&selection.link_path).map_err(|e| AgentryError::LinkRemoveFailed {
            path: selection.link_path.display().to_string(),
            reason: e.to_string(),
        })?;
    }
    if selection.kind == AssetKind::Skill {
        if let Some(dir) = selection.link_path.parent() {
            let _ = fs::remove_dir(dir);
        }
    }
    Ok(())
}
