use clap::Parser;

/// Arguments for the remove command
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Alias of the source to remove
    pub alias: String,
}
