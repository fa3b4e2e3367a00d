//! One-time legacy alias migration
//!
//! Old versions issued short aliases (1-4 lowercase letters plus optional
//! digits). On every load, such aliases are rewritten to the dotted
//! canonical form (`owner.repo` / `local.<dirname>`), the cache directory
//! and materialized links are renamed to match where possible, and every
//! selection and staged entry is rekeyed. Rename failures are tolerated:
//! the stored paths then keep pointing at the old locations, and `cure`
//! collects any links that went stale because of it.

use std::fs;
use std::path::{Path, PathBuf};

use super::{AssetKind, StoreData};
use crate::alias;

/// Rewrite all legacy aliases in the store. Returns true when anything
/// changed (the caller persists the store in that case).
pub fn migrate_legacy_aliases(data: &mut StoreData, sources_root: &Path) -> bool {
    let mut changed = false;

    let legacy: Vec<String> = data
        .sources
        .iter()
        .filter(|s| alias::is_legacy_alias(&s.alias))
        .map(|s| s.alias.clone())
        .collect();

    for old in legacy {
        let Some(idx) = data.sources.iter().position(|s| s.alias == old) else {
            continue;
        };
        let base = alias::base_alias(&data.sources[idx].origin, &data.sources[idx].path);
        let new = alias::allocate(&base, |candidate| {
            candidate != old && data.sources.iter().any(|s| s.alias == candidate)
        });
        if new == old {
            continue;
        }

        rekey_source(data, idx, &old, &new, sources_root);
        changed = true;
    }

    changed
}

fn rekey_source(data: &mut StoreData, idx: usize, old: &str, new: &str, sources_root: &Path) {
    data.sources[idx].alias = new.to_string();

    // Rename the cache directory when it follows the per-alias layout;
    // failure leaves the path field pointing at the old location.
    let old_dir = sources_root.join(old);
    let new_dir = sources_root.join(new);
    if data.sources[idx].path == old_dir
        && old_dir.is_dir()
        && fs::rename(&old_dir, &new_dir).is_ok()
    {
        data.sources[idx].path = new_dir;
    }

    for selection in data.selections.iter_mut().filter(|s| s.source == old) {
        selection.source = new.to_string();
        if let Some(rekeyed) = rekey_link_path(&selection.link_path, selection.kind, old, new) {
            // Best effort: keep the on-disk link in step with the record
            let _ = rename_link(&selection.link_path, &rekeyed, selection.kind);
            selection.link_path = rekeyed;
        }
    }

    for entry in data.staged_entries.iter_mut().filter(|e| e.source == old) {
        entry.source = new.to_string();
    }
}

/// Rewrite the alias-derived prefix inside a materialized link path.
///
/// Skills rename their containing `<alias>-<name>` directory; agents and
/// commands rename the `<alias>-<basename>` link file itself.
fn rekey_link_path(link_path: &Path, kind: AssetKind, old: &str, new: &str) -> Option<PathBuf> {
    match kind {
        AssetKind::Skill => {
            let dir = link_path.parent()?;
            let renamed = replace_prefix(dir.file_name()?.to_str()?, old, new)?;
            Some(dir.with_file_name(renamed).join(link_path.file_name()?))
        }
        AssetKind::Agent | AssetKind::Command => {
            let renamed = replace_prefix(link_path.file_name()?.to_str()?, old, new)?;
            Some(link_path.with_file_name(renamed))
        }
        AssetKind::McpConfig => None,
    }
}

fn replace_prefix(name: &str, old: &str, new: &str) -> Option<String> {
    name.strip_prefix(&format!("{old}-"))
        .map(|rest| format!("{new}-{rest}"))
}

fn rename_link(old_path: &Path, new_path: &Path, kind: AssetKind) -> std::io::Result<()> {
    match kind {
        AssetKind::Skill => {
            let (Some(old_dir), Some(new_dir)) = (old_path.parent(), new_path.parent()) else {
                return Ok(());
            };
            if old_dir.exists() {
                fs::rename(old_dir, new_dir)?;
            }
            Ok(())
        }
        AssetKind::Agent | AssetKind::Command => {
            if old_path.symlink_metadata().is_ok() {
                fs::rename(old_path, new_path)?;
            }
            Ok(())
        }
        AssetKind::McpConfig => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::registry::{Asset, Selection, Source, SourceOrigin, StagedEntry};
    use tempfile::TempDir;

    fn remote_source(alias: &str, path: PathBuf) -> Source {
        Source {
            alias: alias.to_string(),
            origin: SourceOrigin::Remote {
                url: "https://github.com/octo/spoon.git".to_string(),
                owner: "octo".to_string(),
                repo: "spoon".to_string(),
            },
            path,
            assets: vec![Asset {
                kind: AssetKind::Agent,
                path: "agents/a.md".to_string(),
                name: "a".to_string(),
            }],
            updated_at: 0,
        }
    }

    #[test]
    fn test_legacy_alias_rekeyed_everywhere() {
        let temp = TempDir::new().expect("temp");
        let sources_root = temp.path().join("sources");
        let old_dir = sources_root.join("abcd");
        fs::create_dir_all(&old_dir).expect("mkdir");

        let mut data = StoreData {
            sources: vec![remote_source("abcd", old_dir)],
            selections: vec![Selection {
                source: "abcd".to_string(),
                path: "agents/a.md".to_string(),
                kind: AssetKind::Agent,
                link_path: temp.path().join("target/agents/abcd-a.md"),
            }],
            staged_entries: vec![StagedEntry {
                source: "abcd".to_string(),
                bundle: "mcp.json".to_string(),
                server: "github".to_string(),
            }],
        };

        assert!(migrate_legacy_aliases(&mut data, &sources_root));

        assert_eq!(data.sources[0].alias, "octo.spoon");
        assert_eq!(data.sources[0].path, sources_root.join("octo.spoon"));
        assert!(sources_root.join("octo.spoon").is_dir());

        assert_eq!(data.selections[0].source, "octo.spoon");
        assert_eq!(
            data.selections[0].link_path,
            temp.path().join("target/agents/octo.spoon-a.md")
        );
        assert_eq!(data.staged_entries[0].source, "octo.spoon");
    }

    #[test]
    fn test_canonical_alias_untouched() {
        let temp = TempDir::new().expect("temp");
        let mut data = StoreData {
            sources: vec![remote_source("octo.spoon", temp.path().join("octo.spoon"))],
            selections: vec![],
            staged_entries: vec![],
        };
        assert!(!migrate_legacy_aliases(&mut data, temp.path()));
        assert_eq!(data.sources[0].alias, "octo.spoon");
    }

    #[test]
    fn test_migration_collision_gets_suffix() {
        let temp = TempDir::new().expect("temp");
        let mut data = StoreData {
            sources: vec![
                remote_source("octo.spoon", temp.path().join("octo.spoon")),
                remote_source("abcd", temp.path().join("abcd")),
            ],
            selections: vec![],
            staged_entries: vec![],
        };
        assert!(migrate_legacy_aliases(&mut data, temp.path()));
        assert_eq!(data.sources[1].alias, "octo.spoon2");
    }

    #[test]
    fn test_skill_link_path_rekeyed() {
        let temp = TempDir::new().expect("temp");
        let link = temp.path().join("target/skills/ab1-deploy/SKILL.md");
        let mut data = StoreData {
            sources: vec![remote_source("ab1", temp.path().join("ab1"))],
            selections: vec![Selection {
                source: "ab1".to_string(),
                path: "skills/deploy/SKILL.md".to_string(),
                kind: AssetKind::Skill,
                link_path: link,
            }],
            staged_entries: vec![],
        };
        assert!(migrate_legacy_aliases(&mut data, temp.path()));
        assert_eq!(
            data.selections[0].link_path,
            temp.path().join("target/skills/octo.spoon-deploy/SKILL.md")
        );
    }

    #[test]
    fn test_dir_rename_failure_tolerated() {
        let temp = TempDir::new().expect("temp");
        // Source directory never created on disk: rename fails, alias
        // still migrates and path stays at the old location
        let old_path = temp.path().join("sources/abcd");
        let mut data = StoreData {
            sources: vec![remote_source("abcd", old_path.clone())],
            selections: vec![],
            staged_entries: vec![],
        };
        assert!(migrate_legacy_aliases(&mut data, &temp.path().join("sources")));
        assert_eq!(data.sources[0].alias, "octo.spoon");
        assert_eq!(data.sources[0].path, old_path);
    }
}
