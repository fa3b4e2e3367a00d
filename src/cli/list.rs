use clap::Parser;

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show every detected asset, not just counts
    #[arg(long, short = 'd')]
    pub detailed: bool,
}
