//! Config file discovery.
//!
//! Searches `start_dir` and its ancestors for bytesed.toml. The search
//! ends at the first directory holding `.git` (a directory, or a file in
//! worktrees and submodules).

use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;
use crate::error::{Error, Result};

/// Nearest bytesed.toml at or above `start_dir`, not crossing a git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Config path from `-C`/`BYTESED_CONFIG` (clap merges the two), else
/// discovery from `cwd`, else `None` for defaults.
///
/// A relative explicit path is taken relative to `cwd`.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    let Some(path) = explicit else {
        return Ok(find_config(cwd));
    };

    let path = cwd.join(path);
    if !path.is_file() {
        return Err(Error::Config {
            message: format!("config file not found: {}", path.display()),
            path: Some(path),
        });
    }
    Ok(Some(path))
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
