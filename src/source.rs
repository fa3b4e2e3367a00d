//! Source argument parsing
//!
//! Accepted forms:
//! - Local directory paths: `./assets`, `../shared`, `/abs/path`
//! - GitHub short-form: `owner/repo`, `@owner/repo`, `github:owner/repo`
//! - Full git URLs: `https://...`, `git@host:...`, `ssh://...`

use std::path::{Path, PathBuf};

use crate::error::{AgentryError, Result};
use crate::registry::SourceOrigin;
use crate::registry::serialization::owner_repo_from_url;

/// A parsed source argument, before materialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Remote { url: String, owner: String, repo: String },
    Local { path: PathBuf },
}

impl SourceSpec {
    /// Parse a user-supplied source argument
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(invalid(input, "empty source"));
        }

        if looks_like_path(input) {
            let path = Path::new(input);
            if !path.is_dir() {
                return Err(invalid(input, "local path is not a directory"));
            }
            let resolved = dunce::canonicalize(path)
                .map_err(|e| invalid(input, &format!("cannot resolve path: {e}")))?;
            return Ok(SourceSpec::Local { path: resolved });
        }

        let url = parse_remote_url(input)?;
        let (owner, repo) = owner_repo_from_url(&url);
        Ok(SourceSpec::Remote { url, owner, repo })
    }

    /// Registry origin record for this spec
    pub fn origin(&self) -> SourceOrigin {
        match self {
            SourceSpec::Remote { url, owner, repo } => SourceOrigin::Remote {
                url: url.clone(),
                owner: owner.clone(),
                repo: repo.clone(),
            },
            SourceSpec::Local { .. } => SourceOrigin::Local,
        }
    }
}

fn looks_like_path(input: &str) -> bool {
    input.starts_with('.')
        || input.starts_with('/')
        || input.starts_with('~')
        || Path::new(input).is_absolute()
        || Path::new(input).is_dir()
}

/// True for `owner/repo` with exactly one slash and no URL markers
fn is_github_shorthand(input: &str) -> bool {
    let parts: Vec<&str> = input.split('/').collect();
    parts.len() == 2
        && parts.iter().all(|p| !p.is_empty())
        && !input.contains(':')
        && !input.contains('@')
}

fn parse_remote_url(input: &str) -> Result<String> {
    if let Some(rest) = input.strip_prefix("github:") {
        if !is_github_shorthand(rest) {
            return Err(invalid(input, "expected github:owner/repo"));
        }
        return Ok(format!("https://github.com/{rest}.git"));
    }

    if let Some(rest) = input.strip_prefix('@') {
        if is_github_shorthand(rest) {
            return Ok(format!("https://github.com/{rest}.git"));
        }
        return Err(invalid(input, "expected @owner/repo"));
    }

    if is_github_shorthand(input) {
        return Ok(format!("https://github.com/{input}.git"));
    }

    if input.starts_with("https://")
        || input.starts_with("http://")
        || input.starts_with("git@")
        || input.starts_with("ssh://")
        || input.starts_with("file://")
    {
        return Ok(input.to_string());
    }

    Err(invalid(input, "unrecognized source format"))
}

fn invalid(input: &str, reason: &str) -> AgentryError {
    AgentryError::InvalidSource {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
