//! Asset detection
//!
//! Scans a source directory tree and classifies files into typed assets:
//! - Agents: `.md` files under an `agents/` segment, or any other `.md`
//!   whose frontmatter carries `tools` or `model`
//! - Skills: `skills/<name>/SKILL.md` at any depth
//! - Commands: `.md` files under a `commands/` segment
//! - MCP configs: `.json` files naming `mcp` whose top-level object has an
//!   `mcpServers` key, plus a few fixed candidate paths
//!
//! Detection is purely a read: a missing root yields empty results, and
//! unreadable or malformed files are skipped, never an error.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::frontmatter;
use crate::registry::{Asset, AssetKind};

/// Directory segments excluded from traversal
const EXCLUDED_DIRS: &[&str] = &["node_modules"];

/// Frontmatter keys marking a markdown file as an agent definition
const AGENT_MARKER_KEYS: &[&str] = &["tools", "model"];

/// Fixed MCP config locations checked even when the name rule misses
const MCP_CANDIDATE_PATHS: &[&str] = &["mcp.json", ".mcp.json", "config/mcp.json"];

/// Detected assets grouped by kind
#[derive(Debug, Default, Clone)]
pub struct DetectedAssets {
    pub agents: Vec<Asset>,
    pub skills: Vec<Asset>,
    pub commands: Vec<Asset>,
    pub mcp_configs: Vec<Asset>,
}

impl DetectedAssets {
    pub fn len(&self) -> usize {
        self.agents.len() + self.skills.len() + self.commands.len() + self.mcp_configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into a single asset list (agents, skills, commands, configs)
    pub fn into_assets(self) -> Vec<Asset> {
        let mut all = self.agents;
        all.extend(self.skills);
        all.extend(self.commands);
        all.extend(self.mcp_configs);
        all
    }
}

/// Scan a source root and classify its files.
///
/// Follows symlinks with a canonical-path visited set to break cycles.
/// Hidden directories and dependency caches are pruned entirely.
pub fn scan(root: &Path) -> DetectedAssets {
    let mut detected = DetectedAssets::default();
    if !root.is_dir() {
        return detected;
    }

    let mut visited: HashSet<PathBuf> = HashSet::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| keep_entry(entry, &mut visited));

    for entry in walker {
        let Ok(entry) = entry else {
            // Broken links, permission errors, symlink loops: skip
            continue;
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        classify_file(entry.path(), rel, &mut detected);
    }

    for candidate in MCP_CANDIDATE_PATHS {
        let rel = Path::new(candidate);
        let abs = root.join(rel);
        if abs.is_file() && is_mcp_config(&abs) {
            push_unique(&mut detected.mcp_configs, mcp_asset(rel));
        }
    }

    detected
}

/// Traversal filter: prune hidden and excluded directory segments, and
/// directories already seen under another (symlinked) path.
fn keep_entry(entry: &DirEntry, visited: &mut HashSet<PathBuf>) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    if entry.file_type().is_dir() {
        if name.starts_with('.') || EXCLUDED_DIRS.contains(&name.as_ref()) {
            return false;
        }
        if let Ok(canonical) = dunce::canonicalize(entry.path()) {
            return visited.insert(canonical);
        }
    }
    true
}

/// Apply every classification rule independently to one file
fn classify_file(abs: &Path, rel: &Path, detected: &mut DetectedAssets) {
    let extension = rel
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("md") => {
            let under_agents = has_parent_segment(rel, "agents");
            if under_agents {
                push_unique(&mut detected.agents, stem_asset(AssetKind::Agent, rel));
            }
            if is_skill_file(rel) {
                push_unique(&mut detected.skills, skill_asset(rel));
            }
            if has_parent_segment(rel, "commands") {
                push_unique(&mut detected.commands, stem_asset(AssetKind::Command, rel));
            }
            if !under_agents && has_agent_frontmatter(abs) {
                push_unique(&mut detected.agents, stem_asset(AssetKind::Agent, rel));
            }
        }
        Some("json") => {
            let name = rel
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            if name.contains("mcp") && is_mcp_config(abs) {
                push_unique(&mut detected.mcp_configs, mcp_asset(rel));
            }
        }
        _ => {}
    }
}

/// True if any ancestor directory segment of `rel` has the given name
fn has_parent_segment(rel: &Path, segment: &str) -> bool {
    rel.parent()
        .map(|parent| {
            parent
                .components()
                .any(|c| c.as_os_str().to_string_lossy() == segment)
        })
        .unwrap_or(false)
}

/// Matches `.../skills/<name>/SKILL.md`
fn is_skill_file(rel: &Path) -> bool {
    if rel.file_name().map(|n| n != "SKILL.md").unwrap_or(true) {
        return false;
    }
    rel.parent()
        .and_then(Path::parent)
        .and_then(Path::file_name)
        .map(|n| n == "skills")
        .unwrap_or(false)
}

/// Markdown outside an agents directory counts as an agent when its
/// frontmatter carries a `tools` or `model` key
fn has_agent_frontmatter(abs: &Path) -> bool {
    let Ok(content) = fs::read_to_string(abs) else {
        return false;
    };
    frontmatter::parse_frontmatter_and_body(&content)
        .map(|(fm, _)| frontmatter::has_any_key(&fm, AGENT_MARKER_KEYS))
        .unwrap_or(false)
}

/// A JSON file is an MCP config only if its top-level object has `mcpServers`.
/// Malformed JSON is silently excluded.
fn is_mcp_config(abs: &Path) -> bool {
    let Ok(content) = fs::read_to_string(abs) else {
        return false;
    };
    serde_json::from_str::<serde_json::Value>(&content)
        .ok()
        .and_then(|v| v.as_object().map(|o| o.contains_key("mcpServers")))
        .unwrap_or(false)
}

fn rel_string(rel: &Path) -> String {
    rel.to_string_lossy().replace('\\', "/")
}

/// Asset named after the file stem (agents, commands)
fn stem_asset(kind: AssetKind, rel: &Path) -> Asset {
    let name = rel
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    Asset {
        kind,
        path: rel_string(rel),
        name,
    }
}

/// Skill asset named after the containing directory, not the file
fn skill_asset(rel: &Path) -> Asset {
    let name = rel
        .parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    Asset {
        kind: AssetKind::Skill,
        path: rel_string(rel),
        name,
    }
}

fn mcp_asset(rel: &Path) -> Asset {
    let name = rel
        .file_stem()
        .map(|s| s.to_string_lossy().trim_start_matches('.').to_string())
        .unwrap_or_default();
    Asset {
        kind: AssetKind::McpConfig,
        path: rel_string(rel),
        name,
    }
}

/// Within one kind, the same relative path must not appear twice even when
/// matched by multiple rule branches
fn push_unique(assets: &mut Vec<Asset>, asset: Asset) {
    if !assets.iter().any(|a| a.path == asset.path) {
        assets.push(asset);
    }
}
