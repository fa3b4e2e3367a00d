//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - add: Register a new source
//! - remove: Remove a source
//! - update: Refresh sources
//! - list: List sources and assets
//! - link: Link/unlink command arguments
//! - mcp: MCP staging and sync subcommands
//! - completions: Shell completions

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod add;
pub mod completions;
pub mod link;
pub mod list;
pub mod mcp;
pub mod remove;
pub mod update;

pub use add::AddArgs;
pub use completions::CompletionsArgs;
pub use link::{LinkArgs, UnlinkArgs};
pub use list::ListArgs;
pub use mcp::{McpArgs, McpSubcommand};
pub use remove::RemoveArgs;
pub use update::UpdateArgs;

/// Agentry - registry and symlink manager for AI coding assets
#[derive(Parser, Debug)]
#[command(
    name = "agentry",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Registry and symlink manager for AI coding assets",
    long_about = "Agentry registers asset sources (git repositories or local directories of \
                  agents, skills, commands and MCP configs), links selected assets into a \
                  target directory as namespaced symlinks, and merges staged MCP server \
                  entries into a single config file.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  agentry add octo/spoon                   \x1b[90m# Register from GitHub shorthand\x1b[0m\n   \
                  agentry add ./my-assets                  \x1b[90m# Register a local directory\x1b[0m\n   \
                  agentry link octo.spoon agents/a.md      \x1b[90m# Materialize an asset\x1b[0m\n   \
                  agentry status                           \x1b[90m# Check link health\x1b[0m\n   \
                  agentry mcp stage octo.spoon mcp.json github\n   \
                  agentry mcp sync                         \x1b[90m# Write merged MCP config\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a source (git repository or local directory)
    Add(AddArgs),

    /// Remove a source and everything linked from it
    Remove(RemoveArgs),

    /// Refresh sources and re-detect their assets
    Update(UpdateArgs),

    /// List registered sources and their assets
    List(ListArgs),

    /// Link assets into the target directory
    Link(LinkArgs),

    /// Remove links for assets
    Unlink(UnlinkArgs),

    /// Check the health of all links
    Status,

    /// Remove broken links and their records
    Cure,

    /// Stage and merge MCP server entries
    Mcp(McpArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
