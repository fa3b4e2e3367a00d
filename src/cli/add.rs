use clap::Parser;

/// Arguments for the add command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Register from GitHub:\n    agentry add octo/spoon\n    \
                   agentry add github:octo/spoon\n\n\
                   Register a local directory:\n    agentry add ./my-assets\n\n\
                   Pick the alias yourself:\n    agentry add octo/spoon --alias spoon.main")]
pub struct AddArgs {
    /// Source to register: owner/repo, github:owner/repo, a git URL, or a local path
    pub source: String,

    /// Use this alias instead of the generated one (must be free)
    #[arg(long)]
    pub alias: Option<String>,
}
