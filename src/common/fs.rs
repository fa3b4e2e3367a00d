//! Shared filesystem helpers

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use crate::error::{AgentryError, Result};

/// Options for recursive directory copies
#[derive(Debug, Default, Clone)]
pub struct CopyOptions {
    /// Entry names skipped at every depth
    pub exclude: Vec<String>,
}

impl CopyOptions {
    /// Skip the `.git` directory; used when copying local sources into the
    /// cache root, where only the working files matter.
    pub fn exclude_git() -> Self {
        Self {
            exclude: vec![".git".to_string()],
        }
    }

    fn is_excluded(&self, name: &OsStr) -> bool {
        self.exclude.iter().any(|e| name.to_str() == Some(e))
    }
}

/// Copy a directory tree, skipping excluded entry names at every depth
pub fn copy_dir_recursive(src: &Path, dst: &Path, options: &CopyOptions) -> Result<()> {
    fs::create_dir_all(dst).map_err(|e| write_failed(dst, &e))?;

    for entry in fs::read_dir(src).map_err(|e| read_failed(src, &e))? {
        let entry = entry.map_err(|e| read_failed(src, &e))?;
        let name = entry.file_name();
        if options.is_excluded(&name) {
            continue;
        }

        let target = dst.join(&name);
        if entry.path().is_dir() {
            copy_dir_recursive(&entry.path(), &target, options)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| write_failed(&target, &e))?;
        }
    }

    Ok(())
}

fn read_failed(path: &Path, err: &std::io::Error) -> AgentryError {
    AgentryError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

fn write_failed(path: &Path, err: &std::io::Error) -> AgentryError {
    AgentryError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
