//! Config editing entry points
//!
//! Every operation follows the same load-or-create / mutate / persist pattern:
//! a missing file is treated as an empty document (never an error), the needed
//! section scaffolding is found or created, the specific mutation is applied,
//! and the whole document is written back. I/O failures during load or save
//! propagate naming the failing path; nothing is retried, and a failure before
//! save leaves the previous on-disk file untouched.
//!
//! No lock is taken on the config file. Separate invocations racing on the
//! same path follow last-write-wins.

use log::debug;
use std::path::Path;

use crate::document::ConfigDocument;
use crate::error::Result;

/// Append a source entry to the config at `path`.
///
/// Calling this twice with the same name produces two entries sharing that
/// identifier; lookups treat the first in document order as canonical.
pub fn add_source(path: &Path, name: &str, url: &str) -> Result<()> {
    debug!("Adding source {} ({}) to {}", name, url, path.display());

    let (mut document, _) = ConfigDocument::load_or_empty(path)?;
    document.add_source(name, url)?;
    document.save(path)
}

/// Store credentials for the named source in the config at `path`.
///
/// Replaces any previously stored credentials for that source wholesale.
pub fn add_credentials(path: &Path, name: &str, username: &str, password: &str) -> Result<()> {
    debug!("Adding credentials for {} to {}", name, path.display());

    let (mut document, _) = ConfigDocument::load_or_empty(path)?;
    document.set_credentials(name, username, password)?;
    document.save(path)
}

/// Append a mapping pattern for the named source in the config at `path`.
pub fn add_mapping(path: &Path, name: &str, pattern: &str) -> Result<()> {
    debug!(
        "Adding mapping {} -> {} to {}",
        name,
        pattern,
        path.display()
    );

    let (mut document, _) = ConfigDocument::load_or_empty(path)?;
    document.add_mapping(name, pattern)?;
    document.save(path)
}

/// Create an empty config file at `path` when none exists.
///
/// Returns `true` when a new file was written and `false` when an existing
/// file was left untouched.
pub fn init(path: &Path) -> Result<bool> {
    if path.exists() {
        debug!("Config already present at {}", path.display());
        return Ok(false);
    }

    let mut document = ConfigDocument::empty();
    document.save(path)?;
    Ok(true)
}
