//! Clone and refresh operations
//!
//! `clone` materializes a remote into a source cache directory; `refresh`
//! fetches the remote default branch and hard-resets the working tree to
//! it, so the directory always mirrors the remote (local edits to cached
//! sources are not supported).

use std::path::Path;

use git2::{FetchOptions, RemoteCallbacks, Repository, ResetType, build::RepoBuilder};

use super::auth::setup_auth_callbacks;
use super::url::normalize_ssh_url_for_clone;
use crate::error::{AgentryError, Result};

fn fetch_options<'a>() -> FetchOptions<'a> {
    let mut callbacks = RemoteCallbacks::new();
    setup_auth_callbacks(&mut callbacks);
    let mut options = FetchOptions::new();
    options.remote_callbacks(callbacks);
    options
}

/// Clone a git repository into a target directory.
///
/// Remote URLs are shallow-cloned (depth 1); the cache only ever needs the
/// tip of the default branch.
pub fn clone(url: &str, target: &Path) -> Result<Repository> {
    let mut options = fetch_options();

    let is_local =
        url.starts_with("file://") || url.starts_with('/') || Path::new(url).is_absolute();
    if !is_local {
        options.depth(1);
    }

    let mut builder = RepoBuilder::new();
    builder.fetch_options(options);

    let url_to_clone = normalize_ssh_url_for_clone(url);
    builder
        .clone(url_to_clone.as_ref(), target)
        .map_err(|e| AgentryError::GitCloneFailed {
            url: url.to_string(),
            reason: e.message().to_string(),
        })
}

/// Fetch the remote default branch and hard-reset the working tree to it
pub fn refresh(path: &Path) -> Result<()> {
    let repo = Repository::open(path).map_err(|e| AgentryError::GitOpenFailed {
        path: path.display().to_string(),
        reason: e.message().to_string(),
    })?;

    {
        let mut remote = repo
            .find_remote("origin")
            .map_err(|e| AgentryError::GitFetchFailed {
                reason: e.message().to_string(),
            })?;
        let mut options = fetch_options();
        remote
            .fetch(&[] as &[&str], Some(&mut options), None)
            .map_err(|e| AgentryError::GitFetchFailed {
                reason: e.message().to_string(),
            })?;
    }

    let fetch_head =
        repo.find_reference("FETCH_HEAD")
            .map_err(|e| AgentryError::GitFetchFailed {
                reason: e.message().to_string(),
            })?;
    let target = fetch_head
        .peel(git2::ObjectType::Commit)
        .map_err(|e| AgentryError::GitFetchFailed {
            reason: e.message().to_string(),
        })?;
    repo.reset(&target, ResetType::Hard, None)?;
    Ok(())
}
