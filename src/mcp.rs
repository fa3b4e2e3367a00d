//! Staged MCP config merge
//!
//! Staging queues named server entries of detected MCP config bundles in
//! the registry. A sync builds the merged `mcpServers` map (best effort:
//! unreadable bundles and missing entries are skipped and reported, never
//! fatal), overlays it onto the existing output file's entries, writes the
//! output, and clears the staged entries only after a successful write.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};

use crate::env::Env;
use crate::error::{AgentryError, Result};
use crate::registry::{AssetKind, Registry};

/// Per-name outcome of a stage/unstage call
#[derive(Debug, Default)]
pub struct StageReport {
    /// Names newly staged (or removed, for unstage)
    pub changed: Vec<String>,
    /// Names that were already in (or absent from) the staged set
    pub unchanged: Vec<String>,
}

/// One entry the next sync would merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    pub server: String,
    pub source: String,
    /// File name of the bundle the entry comes from
    pub bundle_file: String,
}

/// Result of building the merged map
#[derive(Debug, Default)]
pub struct MergedConfig {
    pub servers: Map<String, Value>,
    /// Staged entries that could not be resolved, with the reason
    pub skipped: Vec<String>,
}

/// Outcome of a sync write
#[derive(Debug)]
pub struct SyncReport {
    pub written: usize,
    pub skipped: Vec<String>,
    pub output: PathBuf,
}

/// Queue server entries of a bundle for merge; idempotent per name.
///
/// The source must exist and the bundle must be a detected MCP config.
pub fn stage(
    registry: &mut Registry,
    alias: &str,
    bundle: &str,
    servers: &[String],
) -> Result<StageReport> {
    require_bundle(registry, alias, bundle)?;
    let mut report = StageReport::default();
    for server in servers {
        if registry.stage_entry(alias, bundle, server) {
            report.changed.push(server.clone());
        } else {
            report.unchanged.push(server.clone());
        }
    }
    Ok(report)
}

/// Remove staged entries; symmetric to [`stage`]
pub fn unstage(
    registry: &mut Registry,
    alias: &str,
    bundle: &str,
    servers: &[String],
) -> Result<StageReport> {
    require_bundle(registry, alias, bundle)?;
    let mut report = StageReport::default();
    for server in servers {
        if registry.unstage_entry(alias, bundle, server) {
            report.changed.push(server.clone());
        } else {
            report.unchanged.push(server.clone());
        }
    }
    Ok(report)
}

fn require_bundle(registry: &Registry, alias: &str, bundle: &str) -> Result<()> {
    let source = registry
        .get_source(alias)
        .ok_or_else(|| AgentryError::SourceNotFound {
            alias: alias.to_string(),
        })?;
    let is_bundle = source
        .asset(bundle)
        .map(|a| a.kind == AssetKind::McpConfig)
        .unwrap_or(false);
    if !is_bundle {
        return Err(AgentryError::AssetNotFound {
            alias: alias.to_string(),
            path: bundle.to_string(),
        });
    }
    Ok(())
}

/// Server entry names of a bundle file, or empty on any read/parse failure
pub fn server_names(bundle_path: &Path) -> Vec<String> {
    read_servers(bundle_path)
        .map(|servers| servers.keys().cloned().collect())
        .unwrap_or_default()
}

/// Build the merged map from all staged entries.
///
/// Bundle files are parsed once per (source, bundle) pair. Unresolvable
/// entries are skipped and reported; entries staged later overwrite earlier
/// ones of the same name, deterministically for a given stored order.
pub fn build_merged(registry: &Registry) -> MergedConfig {
    let mut merged = MergedConfig::default();
    let mut cache: HashMap<(String, String), Option<Map<String, Value>>> = HashMap::new();

    for entry in registry.staged_entries() {
        let Some(source) = registry.get_source(&entry.source) else {
            merged
                .skipped
                .push(format!("{}: source '{}' not found", entry.server, entry.source));
            continue;
        };

        let key = (entry.source.clone(), entry.bundle.clone());
        let servers = cache
            .entry(key)
            .or_insert_with(|| read_servers(&source.path.join(&entry.bundle)));

        let Some(servers) = servers else {
            merged
                .skipped
                .push(format!("{}: could not read {}", entry.server, entry.bundle));
            continue;
        };
        match servers.get(&entry.server) {
            Some(value) => {
                merged.servers.insert(entry.server.clone(), value.clone());
            }
            None => merged
                .skipped
                .push(format!("{}: no such entry in {}", entry.server, entry.bundle)),
        }
    }

    merged
}

/// List what the next sync would add, without touching the output file
pub fn preview(registry: &Registry) -> Vec<PlannedEntry> {
    registry
        .staged_entries()
        .iter()
        .map(|entry| PlannedEntry {
            server: entry.server.clone(),
            source: entry.source.clone(),
            bundle_file: Path::new(&entry.bundle)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| entry.bundle.clone()),
        })
        .collect()
}

/// Server names currently present in the merged output file (display only)
pub fn existing_output_servers(env: &Env) -> Vec<String> {
    server_names(&env.mcp_output)
}

/// Merge staged entries into the output file and clear the staged set.
///
/// The existing file's own `mcpServers` entries stay underneath the staged
/// ones; other top-level keys are preserved. Staged entries are cleared
/// only after the write succeeded, so a failed sync is retryable.
pub fn sync(env: &Env, registry: &mut Registry) -> Result<SyncReport> {
    let merged = build_merged(registry);
    let written = merged.servers.len();

    let mut document = read_output_document(&env.mcp_output);
    let servers = document
        .entry("mcpServers".to_string())
        .or_insert_with(|| json!({}));
    if let Some(existing) = servers.as_object_mut() {
        for (name, value) in merged.servers {
            existing.insert(name, value);
        }
    } else {
        *servers = Value::Object(merged.servers);
    }

    write_output(&env.mcp_output, &Value::Object(document))?;
    registry.clear_staged_entries();

    Ok(SyncReport {
        written,
        skipped: merged.skipped,
        output: env.mcp_output.clone(),
    })
}

fn read_servers(path: &Path) -> Option<Map<String, Value>> {
    let content = fs::read_to_string(path).ok()?;
    let value: Value = serde_json::from_str(&content).ok()?;
    value
        .get("mcpServers")
        .and_then(Value::as_object)
        .cloned()
}

/// Existing output document, or an empty object when absent or unparsable
fn read_output_document(path: &Path) -> Map<String, Value> {
    fs::read_to_string(path)
        .ok()
        .and_then(|text| serde_json::from_str::<Value>(&text).ok())
        .and_then(|v| v.as_object().cloned())
        .unwrap_or_default()
}

fn write_output(path: &Path, document: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AgentryError::FileWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    }
    let text =
        serde_json::to_string_pretty(document).map_err(|e| AgentryError::FileWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    fs::write(path, text).map_err(|e| AgentryError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
