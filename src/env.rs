//! Well-known filesystem locations for Agentry
//!
//! All components receive an explicit [`Env`] rather than computing paths
//! ad hoc, so tests can point every root at a temporary directory.

use std::path::{Path, PathBuf};

use crate::error::{AgentryError, Result};
use crate::registry::AssetKind;

/// Configuration directory name under the user's config directory
const CONFIG_DIR: &str = "agentry";

/// Registry document file name
pub const REGISTRY_FILE: &str = "registry.json";

/// Subdirectory of the config directory holding one clone/copy per source
pub const SOURCES_DIR: &str = "sources";

/// Default link target directory under the user's home
const TARGET_DIR: &str = ".claude";

/// Merged MCP output file name under the target root
pub const MCP_OUTPUT_FILE: &str = ".mcp.json";

/// Resolved filesystem locations threaded into every component
#[derive(Debug, Clone)]
pub struct Env {
    /// Persisted registry document
    pub registry_file: PathBuf,
    /// Root holding one subdirectory per source, named by alias
    pub sources_root: PathBuf,
    /// Root holding one subdirectory per linkable asset kind
    pub target_root: PathBuf,
    /// Fixed output path for the merged MCP config
    pub mcp_output: PathBuf,
}

impl Env {
    /// Resolve the default environment.
    ///
    /// Uses the platform's standard config location with an `agentry`
    /// subdirectory and `~/.claude` as the link target. Both can be
    /// overridden with `AGENTRY_CONFIG_DIR` and `AGENTRY_TARGET_DIR`.
    pub fn resolve() -> Result<Self> {
        let config_root = match std::env::var("AGENTRY_CONFIG_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::config_dir()
                .ok_or_else(|| AgentryError::EnvUnresolved {
                    what: "config".to_string(),
                })?
                .join(CONFIG_DIR),
        };
        let target_root = match std::env::var("AGENTRY_TARGET_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::home_dir()
                .ok_or_else(|| AgentryError::EnvUnresolved {
                    what: "home".to_string(),
                })?
                .join(TARGET_DIR),
        };
        Ok(Self::from_roots(&config_root, &target_root))
    }

    /// Build an environment from explicit roots (tests supply temp dirs)
    pub fn from_roots(config_root: &Path, target_root: &Path) -> Self {
        Self {
            registry_file: config_root.join(REGISTRY_FILE),
            sources_root: config_root.join(SOURCES_DIR),
            target_root: target_root.to_path_buf(),
            mcp_output: target_root.join(MCP_OUTPUT_FILE),
        }
    }

    /// Directory holding the clone/copy of a source
    pub fn source_dir(&self, alias: &str) -> PathBuf {
        self.sources_root.join(alias)
    }

    /// Link target root for a kind, or `None` for kinds that are never linked
    pub fn link_root(&self, kind: AssetKind) -> Option<PathBuf> {
        kind.link_dir().map(|dir| self.target_root.join(dir))
    }
}
