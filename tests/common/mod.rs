//! Common test utilities for Agentry integration tests

use std::path::PathBuf;

use tempfile::TempDir;

/// An isolated environment for driving the real agentry binary.
///
/// Config and target roots live in a temp directory and are handed to the
/// binary via AGENTRY_CONFIG_DIR / AGENTRY_TARGET_DIR, so tests never touch
/// the real home directory and can run in parallel.
#[allow(dead_code)]
pub struct TestEnv {
    #[allow(dead_code)]
    pub temp: TempDir,
    pub config_dir: PathBuf,
    pub target_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let config_dir = temp.path().join("config");
        let target_dir = temp.path().join("target");
        std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");
        std::fs::create_dir_all(&target_dir).expect("Failed to create target dir");
        Self {
            temp,
            config_dir,
            target_dir,
        }
    }

    /// Command for the real binary, wired to this environment
    #[allow(deprecated)]
    pub fn agentry(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("agentry").expect("binary");
        cmd.env("AGENTRY_CONFIG_DIR", &self.config_dir);
        cmd.env("AGENTRY_TARGET_DIR", &self.target_dir);
        cmd
    }

    /// Create a local asset directory outside the config/target roots
    pub fn create_asset_dir(&self, name: &str) -> PathBuf {
        let dir = self.temp.path().join(name);
        std::fs::create_dir_all(&dir).expect("Failed to create asset dir");
        dir
    }

    /// Write a file under the given root, creating parents
    pub fn write_file(&self, root: &std::path::Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    /// Populate a directory with one asset of each kind
    pub fn populate_assets(&self, root: &std::path::Path) {
        self.write_file(root, "agents/reviewer.md", "# Reviewer\nReviews things.\n");
        self.write_file(root, "commands/ship.md", "# Ship\n");
        self.write_file(root, "skills/deploy/SKILL.md", "# Deploy\n");
        self.write_file(
            root,
            "mcp.json",
            r#"{"mcpServers":{"github":{"command":"gh-mcp"},"postgres":{"command":"pg-mcp"}}}"#,
        );
    }

    pub fn registry_path(&self) -> PathBuf {
        self.config_dir.join("registry.json")
    }

    pub fn read_registry(&self) -> serde_json::Value {
        let text = std::fs::read_to_string(self.registry_path()).expect("Failed to read registry");
        serde_json::from_str(&text).expect("Failed to parse registry")
    }

    pub fn mcp_output_path(&self) -> PathBuf {
        self.target_dir.join(".mcp.json")
    }
}
