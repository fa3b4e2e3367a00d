//! Agentry - registry and symlink manager for AI coding assets
//!
//! Registers asset sources (git repositories or local directories holding
//! agents, skills, commands and MCP configs), links selected assets as
//! namespaced symlinks into a target directory and merges staged MCP
//! server entries into a single config file.

use clap::Parser;

mod alias;
mod cli;
mod commands;
mod common;
mod detect;
mod env;
mod error;
mod frontmatter;
mod git;
mod links;
mod mcp;
mod registry;
mod source;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Add(args) => commands::add::run(args),
        Commands::Remove(args) => commands::remove::run(args),
        Commands::Update(args) => commands::update::run(args),
        Commands::List(args) => commands::list::run(args),
        Commands::Link(args) => commands::link::run(args),
        Commands::Unlink(args) => commands::unlink::run(args),
        Commands::Status => commands::status::run(),
        Commands::Cure => commands::cure::run(),
        Commands::Mcp(args) => commands::mcp::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
