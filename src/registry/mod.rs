//! Persisted source registry
//!
//! One JSON document holds the registered sources, the link selections and
//! the staged MCP entries. The whole document is loaded per operation and
//! rewritten on every save; a missing or unparsable document is an
//! empty-but-valid default, never a load failure. Legacy records are
//! normalized in [`serialization`] and legacy aliases rewritten in
//! [`migration`] before any other code sees the data.

pub mod migration;
pub mod serialization;
mod types;

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::env::Env;
use crate::error::{AgentryError, Result};

pub use types::{Asset, AssetKind, Selection, Source, SourceOrigin, StagedEntry};

/// The registry document as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreData {
    pub sources: Vec<Source>,
    pub selections: Vec<Selection>,
    pub staged_entries: Vec<StagedEntry>,
}

/// In-memory registry bound to its backing file
#[derive(Debug)]
pub struct Registry {
    path: PathBuf,
    data: StoreData,
}

impl Registry {
    /// Load the registry, normalizing legacy records and migrating legacy
    /// aliases. A migration that changed anything is persisted immediately.
    pub fn load(env: &Env) -> Result<Self> {
        let data = match fs::read_to_string(&env.registry_file) {
            Ok(text) => serialization::parse_store(&text).unwrap_or_default(),
            Err(_) => StoreData::default(),
        };

        let mut registry = Self {
            path: env.registry_file.clone(),
            data,
        };
        if migration::migrate_legacy_aliases(&mut registry.data, &env.sources_root) {
            registry.save()?;
        }
        Ok(registry)
    }

    /// Write the whole document back to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| AgentryError::RegistryWriteFailed {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;
        }
        let json =
            serialization::store_to_json(&self.data).map_err(|e| {
                AgentryError::RegistryWriteFailed {
                    path: self.path.display().to_string(),
                    reason: e.to_string(),
                }
            })?;
        fs::write(&self.path, json).map_err(|e| AgentryError::RegistryWriteFailed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    // Sources

    /// Upsert a source by alias. Alias uniqueness is the caller's job
    /// (the alias allocator consults live state before this call).
    pub fn add_source(&mut self, source: Source) {
        match self.data.sources.iter_mut().find(|s| s.alias == source.alias) {
            Some(existing) => *existing = source,
            None => self.data.sources.push(source),
        }
    }

    /// Remove a source, cascading deletion of its selections and staged
    /// entries. The cascaded selections are returned so the caller can
    /// remove their on-disk links.
    pub fn remove_source(&mut self, alias: &str) -> Option<(Source, Vec<Selection>)> {
        let idx = self.data.sources.iter().position(|s| s.alias == alias)?;
        let source = self.data.sources.remove(idx);

        let mut cascaded = Vec::new();
        self.data.selections.retain(|s| {
            if s.source == alias {
                cascaded.push(s.clone());
                false
            } else {
                true
            }
        });
        self.data.staged_entries.retain(|e| e.source != alias);
        Some((source, cascaded))
    }

    pub fn get_source(&self, alias: &str) -> Option<&Source> {
        self.data.sources.iter().find(|s| s.alias == alias)
    }

    pub fn sources(&self) -> &[Source] {
        &self.data.sources
    }

    pub fn has_alias(&self, alias: &str) -> bool {
        self.get_source(alias).is_some()
    }

    /// Replace a source's detected assets and refresh timestamp
    pub fn update_source_assets(&mut self, alias: &str, assets: Vec<Asset>, updated_at: u64) -> bool {
        match self.data.sources.iter_mut().find(|s| s.alias == alias) {
            Some(source) => {
                source.assets = assets;
                source.updated_at = updated_at;
                true
            }
            None => false,
        }
    }

    // Selections

    /// Upsert a selection by its (source, asset path) key
    pub fn add_selection(&mut self, selection: Selection) {
        match self
            .data
            .selections
            .iter_mut()
            .find(|s| s.source == selection.source && s.path == selection.path)
        {
            Some(existing) => *existing = selection,
            None => self.data.selections.push(selection),
        }
    }

    pub fn remove_selection(&mut self, source: &str, path: &str) -> Option<Selection> {
        let idx = self
            .data
            .selections
            .iter()
            .position(|s| s.source == source && s.path == path)?;
        Some(self.data.selections.remove(idx))
    }

    pub fn selections(&self) -> &[Selection] {
        &self.data.selections
    }

    pub fn selections_for_source(&self, alias: &str) -> Vec<&Selection> {
        self.data
            .selections
            .iter()
            .filter(|s| s.source == alias)
            .collect()
    }

    // Staged entries

    /// Queue one server entry for merge; a no-op when already staged
    pub fn stage_entry(&mut self, source: &str, bundle: &str, server: &str) -> bool {
        if self.is_staged(source, bundle, server) {
            return false;
        }
        self.data.staged_entries.push(StagedEntry {
            source: source.to_string(),
            bundle: bundle.to_string(),
            server: server.to_string(),
        });
        true
    }

    pub fn unstage_entry(&mut self, source: &str, bundle: &str, server: &str) -> bool {
        let before = self.data.staged_entries.len();
        self.data
            .staged_entries
            .retain(|e| !(e.source == source && e.bundle == bundle && e.server == server));
        self.data.staged_entries.len() != before
    }

    pub fn is_staged(&self, source: &str, bundle: &str, server: &str) -> bool {
        self.data
            .staged_entries
            .iter()
            .any(|e| e.source == source && e.bundle == bundle && e.server == server)
    }

    pub fn staged_entries(&self) -> &[StagedEntry] {
        &self.data.staged_entries
    }

    pub fn staged_entries_for(&self, source: &str, bundle: &str) -> Vec<&StagedEntry> {
        self.data
            .staged_entries
            .iter()
            .filter(|e| e.source == source && e.bundle == bundle)
            .collect()
    }

    /// Wipe all staged entries (after a successful sync write)
    pub fn clear_staged_entries(&mut self) {
        self.data.staged_entries.clear();
    }
}
