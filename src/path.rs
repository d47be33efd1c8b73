//! Config file path resolution for nuget-login
//!
//! Turns the user-supplied `--target` hint (empty, a file, or a directory)
//! into the single path every other operation works against. Resolution never
//! fails: unresolvable inputs degrade to a best-effort path and any real
//! failure surfaces later at I/O time.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults::CONFIG_FILE_NAME;

/// Resolve the config file path from a `--target` hint.
///
/// - An empty hint searches the well-known default locations under the home
///   directory, falling back to the canonical default whether or not it
///   exists.
/// - A hint naming an existing regular file is returned unchanged.
/// - Otherwise the hint is treated as a file when it has an extension and does
///   not end in a path separator, and as a directory (joined with
///   `NuGet.config`) when it does not.
pub fn resolve_config_path(hint: &str) -> PathBuf {
    if hint.is_empty() {
        return default_config_path();
    }

    if points_to_file(hint) {
        return PathBuf::from(hint);
    }

    Path::new(hint).join(CONFIG_FILE_NAME)
}

/// Heuristic for whether a hint names a file rather than a directory.
///
/// An existing filesystem entry answers authoritatively. For paths that do not
/// exist yet, anything ending in a separator is a directory and anything with
/// a non-empty extension is a file.
fn points_to_file(hint: &str) -> bool {
    debug!("Checking if hint points to a file: {}", hint);

    if let Ok(metadata) = fs::metadata(hint) {
        return metadata.is_file();
    }

    if hint.chars().last().is_some_and(std::path::is_separator) {
        return false;
    }

    Path::new(hint)
        .extension()
        .is_some_and(|ext| !ext.is_empty())
}

/// Returns the default config path under the user's home directory.
///
/// Checks a small ordered set of historically-used subdirectory and filename
/// casings, returning the first that exists. When none exist the canonical
/// default (`~/.nuget/NuGet.config`) is returned without creating anything.
///
/// Falls back to a relative `.nuget/NuGet.config` if the home directory
/// cannot be determined.
pub fn default_config_path() -> PathBuf {
    default_config_path_in(&dirs::home_dir().unwrap_or_default())
}

/// Default-path discovery rooted at an explicit home directory.
fn default_config_path_in(home: &Path) -> PathBuf {
    let canonical = home.join(".nuget").join(CONFIG_FILE_NAME);
    let candidates = [
        canonical.clone(),
        home.join(".nuget").join("nuget.config"),
        home.join(".nuget").join("NuGet").join("nuget.config"),
        home.join(".nuget").join("NuGet").join(CONFIG_FILE_NAME),
    ];

    for candidate in &candidates {
        if candidate.exists() {
            debug!("Found existing config file: {}", candidate.display());
            return candidate.clone();
        }
    }

    canonical
}
