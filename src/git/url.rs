//! URL normalization for git operations

/// Normalize SSH URLs from SCP-style (git@host:path) to ssh:// format.
///
/// libgit2 may have issues with SCP-style SSH URLs, so we convert them to
/// the explicit ssh:// format for better compatibility.
pub fn normalize_ssh_url_for_clone(url: &str) -> std::borrow::Cow<'_, str> {
    if !url.starts_with("git@") || url.starts_with("ssh://") {
        return std::borrow::Cow::Borrowed(url);
    }

    if let Some(colon_pos) = url.find(':') {
        let host_part = &url[..colon_pos];
        let path_part = &url[colon_pos + 1..];
        let normalized_path = if path_part.starts_with('/') {
            path_part.to_string()
        } else {
            format!("/{path_part}")
        };
        return std::borrow::Cow::Owned(format!("ssh://{host_part}{normalized_path}"));
    }

    std::borrow::Cow::Borrowed(url)
}
