//! Default values for nuget-login.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// Canonical config file name written when a hint points at a directory.
pub const CONFIG_FILE_NAME: &str = "NuGet.config";

/// Name of the well-known public registry seeded by `--with-defaults`.
pub const DEFAULT_SOURCE_NAME: &str = "nuget.org";

/// Service index URL of the well-known public registry.
pub const DEFAULT_SOURCE_URL: &str = "https://api.nuget.org/v3/index.json";

/// Wildcard mapping pattern seeded alongside the default source.
pub const DEFAULT_MAPPING_PATTERN: &str = "*";
