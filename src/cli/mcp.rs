use clap::{Parser, Subcommand};

/// Arguments for the mcp command group
#[derive(Parser, Debug)]
pub struct McpArgs {
    #[command(subcommand)]
    pub command: McpSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum McpSubcommand {
    /// Stage servers from a config bundle for the next sync
    #[command(after_help = "EXAMPLES:\n  \
                       agentry mcp stage octo.spoon mcp.json\n  \
                       agentry mcp stage octo.spoon mcp.json github postgres")]
    Stage {
        /// Alias of the source the bundle belongs to
        alias: String,

        /// Bundle path (relative to the source root)
        bundle: String,

        /// Server names to stage (all servers in the bundle when omitted)
        #[arg(num_args = 0..)]
        servers: Vec<String>,
    },

    /// Remove staged servers without touching the output file
    Unstage {
        /// Alias of the source the bundle belongs to
        alias: String,

        /// Bundle path (relative to the source root)
        bundle: String,

        /// Server names to unstage (all staged from this bundle when omitted)
        #[arg(num_args = 0..)]
        servers: Vec<String>,
    },

    /// List server names defined in a config bundle
    Servers {
        /// Alias of the source the bundle belongs to
        alias: String,

        /// Bundle path (relative to the source root)
        bundle: String,
    },

    /// Show staged servers and what a sync would write
    Preview,

    /// Merge staged servers into the output config file
    Sync,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_cli_parsing_mcp_stage_with_servers() {
        let cli = Cli::try_parse_from([
            "agentry", "mcp", "stage", "octo.spoon", "mcp.json", "github", "postgres",
        ])
        .unwrap();
        match cli.command {
            Commands::Mcp(args) => match args.command {
                McpSubcommand::Stage {
                    alias,
                    bundle,
                    servers,
                } => {
                    assert_eq!(alias, "octo.spoon");
                    assert_eq!(bundle, "mcp.json");
                    assert_eq!(servers, vec!["github", "postgres"]);
                }
                _ => panic!("Expected Stage subcommand"),
            },
            _ => panic!("Expected Mcp command"),
        }
    }

    #[test]
    fn test_cli_parsing_mcp_stage_without_servers() {
        let cli = Cli::try_parse_from(["agentry", "mcp", "stage", "octo.spoon", "mcp.json"])
            .unwrap();
        match cli.command {
            Commands::Mcp(args) => match args.command {
                McpSubcommand::Stage { servers, .. } => assert!(servers.is_empty()),
                _ => panic!("Expected Stage subcommand"),
            },
            _ => panic!("Expected Mcp command"),
        }
    }

    #[test]
    fn test_cli_parsing_mcp_sync() {
        let cli = Cli::try_parse_from(["agentry", "mcp", "sync"]).unwrap();
        match cli.command {
            Commands::Mcp(args) => {
                assert!(matches!(args.command, McpSubcommand::Sync));
            }
            _ => panic!("Expected Mcp command"),
        }
    }
}
