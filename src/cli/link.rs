use clap::Parser;

/// Arguments for the link command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   agentry link octo.spoon agents/reviewer.md\n  \
                   agentry link octo.spoon skills/deploy/SKILL.md commands/ship.md")]
pub struct LinkArgs {
    /// Alias of the source the assets belong to
    pub alias: String,

    /// Asset paths (relative to the source root), as shown by 'list --detailed'
    #[arg(required = true, num_args = 1..)]
    pub paths: Vec<String>,
}

/// Arguments for the unlink command
#[derive(Parser, Debug)]
pub struct UnlinkArgs {
    /// Alias of the source the assets belong to
    pub alias: String,

    /// Asset paths to unlink
    #[arg(required = true, num_args = 1..)]
    pub paths: Vec<String>,
}
