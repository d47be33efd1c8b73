//! Source name resolution
//!
//! A user may refer to a source by its registered identifier or by its URL.
//! Resolution scans the config's `packageSources` entries in document order
//! (first match wins) and falls back to a deterministic identifier derived
//! from the URL when nothing matches, so that `add-source <url>` and
//! `add-mapping <url> <pattern>` agree on the name without the user ever
//! spelling one.

use log::debug;
use std::path::Path;
use url::Url;

use crate::document::ConfigDocument;
use crate::error::Result;

/// Resolve the canonical source name for `url_or_name` against the config at
/// `path`.
///
/// A registered entry whose URL or key exactly equals the input wins, ties
/// broken by document order. A missing config file (or one without a
/// `packageSources` section) falls through to URL derivation. Any other load
/// failure propagates.
pub fn resolve_source_name(path: &Path, url_or_name: &str) -> Result<String> {
    let document = match ConfigDocument::load(path) {
        Ok(document) => document,
        Err(error) if error.is_not_found() => return Ok(default_source_name(url_or_name)),
        Err(error) => return Err(error),
    };

    for entry in document.sources() {
        if entry.url == url_or_name || entry.key == url_or_name {
            debug!(
                "Resolved {} to registered source {}",
                url_or_name, entry.key
            );
            return Ok(entry.key);
        }
    }

    Ok(default_source_name(url_or_name))
}

/// Derive a default identifier from a URL.
///
/// Inputs that do not parse as absolute URLs are already names and come back
/// verbatim. For URLs, the conventional service-index suffix is stripped
/// (`/v3/index.json` as a whole, otherwise a bare `/index.json`), remaining
/// path separators become hyphens, and the host is prepended.
fn default_source_name(url_or_name: &str) -> String {
    let Ok(url) = Url::parse(url_or_name) else {
        return url_or_name.to_string();
    };

    let path = url.path();
    let path = path
        .strip_suffix("/v3/index.json")
        .or_else(|| path.strip_suffix("/index.json"))
        .unwrap_or(path);
    let path = path.trim_end_matches('/');

    format!(
        "{}{}",
        url.host_str().unwrap_or_default(),
        path.replace('/', "-")
    )
}
