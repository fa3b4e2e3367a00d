use clap::Parser;

/// Arguments for the update command
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Alias of the source to refresh; all sources when omitted
    pub alias: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::super::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_cli_parsing_update_all() {
        let cli = Cli::try_parse_from(["agentry", "update"]).unwrap();
        match cli.command {
            Commands::Update(args) => assert!(args.alias.is_none()),
            _ => panic!("Expected Update command"),
        }
    }

    #[test]
    fn test_cli_parsing_update_one() {
        let cli = Cli::try_parse_from(["agentry", "update", "octo.spoon"]).unwrap();
        match cli.command {
            Commands::Update(args) => assert_eq!(args.alias.as_deref(), Some("octo.spoon")),
            _ => panic!("Expected Update command"),
        }
    }
}
