//! Git authentication configuration
//!
//! Authentication is delegated entirely to git's native credential system:
//! SSH agent, SSH keys from `~/.ssh/`, and git credential helpers. Nothing
//! agentry-specific is stored.

use git2::{Cred, CredentialType, Error, ErrorClass, RemoteCallbacks};

fn try_ssh_key_files(username: &str) -> std::result::Result<Cred, git2::Error> {
    let home = dirs::home_dir().unwrap_or_default();
    let ssh_dir = home.join(".ssh");

    for key_name in &["id_ed25519", "id_rsa", "id_ecdsa"] {
        let private_key = ssh_dir.join(key_name);
        if !private_key.exists() {
            continue;
        }
        let public_key = ssh_dir.join(format!("{key_name}.pub"));
        let public_key_path = public_key.exists().then_some(public_key.as_path());

        if let Ok(cred) = Cred::ssh_key(username, public_key_path, &private_key, None) {
            return Ok(cred);
        }
    }

    Err(auth_error("SSH key not found"))
}

fn try_credential_helper(
    url: &str,
    username_from_url: Option<&str>,
) -> std::result::Result<Cred, git2::Error> {
    if let Ok(config) = git2::Config::open_default() {
        if let Ok(cred) = Cred::credential_helper(&config, url, username_from_url) {
            return Ok(cred);
        }
    }
    if let Some(username) = username_from_url {
        if let Ok(cred) = Cred::userpass_plaintext(username, "") {
            return Ok(cred);
        }
    }
    Cred::userpass_plaintext("git", "")
}

fn auth_error(message: &str) -> git2::Error {
    Error::new(git2::ErrorCode::Auth, ErrorClass::Http, message)
}

/// Set up authentication callbacks for clone and fetch operations
pub fn setup_auth_callbacks(callbacks: &mut RemoteCallbacks) {
    callbacks.credentials(|url, username_from_url, allowed_types| {
        if allowed_types.contains(CredentialType::DEFAULT) {
            return Cred::default();
        }

        if allowed_types.contains(CredentialType::SSH_KEY) {
            let username = username_from_url.unwrap_or("git");
            return Cred::ssh_key_from_agent(username)
                .or_else(|_| try_ssh_key_files(username));
        }

        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
            return try_credential_helper(url, username_from_url);
        }

        Err(auth_error("authentication failed"))
    });
}
