use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    agentry completions bash > ~/.bash_completion.d/agentry\n\n\
                  Generate zsh completions:\n    agentry completions zsh > ~/.zfunc/_agentry\n\n\
                  Generate fish completions:\n    agentry completions fish > ~/.config/fish/completions/agentry.fish\n\n\
                  Generate PowerShell completions:\n    agentry completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
