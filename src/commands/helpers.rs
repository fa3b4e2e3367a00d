//! Command helper utilities

use std::time::{SystemTime, UNIX_EPOCH};

use crate::env::Env;
use crate::error::Result;
use crate::registry::Registry;

/// Resolve the environment and load the registry
pub fn context() -> Result<(Env, Registry)> {
    let env = Env::resolve()?;
    let registry = Registry::load(&env)?;
    Ok((env, registry))
}

/// Current wall time in seconds since the Unix epoch
pub fn epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
