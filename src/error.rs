//! Error types and handling for Agentry
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Absence of a record (source, selection, staged entry) is a normal outcome
//! and is modeled with `Option` or per-item report entries, not with these
//! error variants. Parse failures during asset detection and MCP bundle
//! reads are absorbed at the call site and never reach this type.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Agentry operations
#[derive(Error, Diagnostic, Debug)]
pub enum AgentryError {
    // Source errors
    #[error("Invalid source: {input}")]
    #[diagnostic(
        code(agentry::source::invalid),
        help("Valid formats: ./path, owner/repo, github:owner/repo, https://github.com/owner/repo.git")
    )]
    InvalidSource { input: String, reason: String },

    #[error("Source '{alias}' not found")]
    #[diagnostic(
        code(agentry::source::not_found),
        help("Run 'agentry list' to see registered sources")
    )]
    SourceNotFound { alias: String },

    #[error("Source already registered as '{alias}'")]
    #[diagnostic(
        code(agentry::source::duplicate),
        help("Run 'agentry update {alias}' to refresh it instead")
    )]
    SourceAlreadyRegistered { alias: String },

    #[error("Alias '{alias}' is already in use")]
    #[diagnostic(code(agentry::source::alias_taken))]
    AliasTaken { alias: String },

    // Asset errors
    #[error("Asset '{path}' not found in source '{alias}'")]
    #[diagnostic(
        code(agentry::asset::not_found),
        help("Run 'agentry list --detailed' to see detected assets")
    )]
    AssetNotFound { alias: String, path: String },

    #[error("'{path}' is an MCP config bundle and cannot be linked")]
    #[diagnostic(
        code(agentry::asset::not_linkable),
        help("Use 'agentry mcp stage' to queue its server entries for merge")
    )]
    AssetNotLinkable { path: String },

    // Link errors
    #[error("Failed to create link at '{path}': {reason}")]
    #[diagnostic(code(agentry::link::create_failed))]
    LinkCreateFailed { path: String, reason: String },

    #[error("Failed to remove link at '{path}': {reason}")]
    #[diagnostic(code(agentry::link::remove_failed))]
    LinkRemoveFailed { path: String, reason: String },

    // Git errors
    #[error("Git operation failed: {message}")]
    #[diagnostic(code(agentry::git::operation_failed))]
    GitOperationFailed { message: String },

    #[error("Failed to clone repository: {url}: {reason}")]
    #[diagnostic(
        code(agentry::git::clone_failed),
        help("Check that URL is correct and you have access to repository")
    )]
    GitCloneFailed { url: String, reason: String },

    #[error("Failed to fetch from remote: {reason}")]
    #[diagnostic(code(agentry::git::fetch_failed))]
    GitFetchFailed { reason: String },

    #[error("Failed to open repository at '{path}': {reason}")]
    #[diagnostic(code(agentry::git::open_failed))]
    GitOpenFailed { path: String, reason: String },

    // Registry errors
    #[error("Failed to write registry: {path}")]
    #[diagnostic(
        code(agentry::registry::write_failed),
        help("Check permissions and free space on the configuration directory")
    )]
    RegistryWriteFailed { path: String, reason: String },

    // Environment errors
    #[error("Could not determine {what} directory")]
    #[diagnostic(
        code(agentry::env::unresolved),
        help("Set AGENTRY_CONFIG_DIR / AGENTRY_TARGET_DIR to override the defaults")
    )]
    EnvUnresolved { what: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(agentry::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(agentry::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },
}

impl From<git2::Error> for AgentryError {
    fn from(err: git2::Error) -> Self {
        AgentryError::GitOperationFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, AgentryError>;
