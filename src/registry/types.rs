//! Persisted registry record types
//!
//! Every "kind" dispatch in the crate goes through the closed enums defined
//! here, so adding a kind is a compile-time-visible change at each consumer.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Classification of a detected asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    Agent,
    Skill,
    Command,
    /// A JSON file listing named MCP server entries; merged, never linked
    McpConfig,
}

impl AssetKind {
    /// Target subdirectory for materialized links, `None` for merge-only kinds
    pub fn link_dir(self) -> Option<&'static str> {
        match self {
            AssetKind::Agent => Some("agents"),
            AssetKind::Skill => Some("skills"),
            AssetKind::Command => Some("commands"),
            AssetKind::McpConfig => None,
        }
    }

    /// Human-facing singular label
    pub fn label(self) -> &'static str {
        match self {
            AssetKind::Agent => "agent",
            AssetKind::Skill => "skill",
            AssetKind::Command => "command",
            AssetKind::McpConfig => "mcp config",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a source's files come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceOrigin {
    /// Cloned from a git remote
    Remote {
        url: String,
        owner: String,
        repo: String,
    },
    /// Copied from a local directory; no external location is retained
    Local,
}

impl SourceOrigin {
    pub fn is_remote(&self) -> bool {
        matches!(self, SourceOrigin::Remote { .. })
    }
}

/// A registered origin of assets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Unique identifier, also the name of the cache subdirectory
    pub alias: String,
    pub origin: SourceOrigin,
    /// Local directory holding the source's files
    pub path: PathBuf,
    /// Last-detected assets, replaced wholesale on each refresh
    #[serde(default)]
    pub assets: Vec<Asset>,
    /// Last refresh time, seconds since the Unix epoch
    #[serde(default)]
    pub updated_at: u64,
}

impl Source {
    /// Look up a detected asset by its relative path
    pub fn asset(&self, path: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.path == path)
    }
}

/// A detected item inside a source's directory.
///
/// Assets are derived views of the filesystem regenerated on every
/// detection pass; `path` (relative to the source root, forward slashes)
/// is the identity key within one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub kind: AssetKind,
    pub path: String,
    pub name: String,
}

/// Records that one agent/skill/command asset is materialized as a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Alias of the owning source
    pub source: String,
    /// Asset path relative to the source root
    pub path: String,
    pub kind: AssetKind,
    /// Materialized symlink location
    pub link_path: PathBuf,
}

/// Records that one named server entry of an MCP config bundle is queued
/// for the next merge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedEntry {
    /// Alias of the owning source
    pub source: String,
    /// Bundle path relative to the source root
    pub bundle: String,
    /// Server entry name inside the bundle's `mcpServers` object
    pub server: String,
}
