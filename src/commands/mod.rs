//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `nuget-login` command-line tool. Each subcommand is defined in its own file
//! to keep the logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` plus the shared
//!   [`GlobalArgs`] and performs the command's logic, calling into the
//!   `nuget_login` library.
//!
//! Global flag state is carried in an explicit [`GlobalArgs`] value passed by
//! reference into every `execute`, never in process-wide state.

pub mod add_mapping;
pub mod add_source;
pub mod init;

use anyhow::Result;
use std::path::Path;

use nuget_login::defaults::{DEFAULT_MAPPING_PATTERN, DEFAULT_SOURCE_NAME, DEFAULT_SOURCE_URL};
use nuget_login::editor;

/// Global CLI options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    /// Config file or directory hint from `--target`; empty means "discover".
    pub target: String,
    /// Seed a default source and mapping into newly created config files.
    pub with_defaults: bool,
}

/// Seed the well-known default source and wildcard mapping when requested.
///
/// Seeding only ever applies to a brand-new file: when the config already
/// existed at command start the request is acknowledged with a warning and
/// skipped, never silently dropped.
pub(crate) fn seed_defaults(
    config_path: &Path,
    globals: &GlobalArgs,
    config_existed: bool,
) -> Result<()> {
    if !globals.with_defaults {
        return Ok(());
    }

    if config_existed {
        println!("Warning - config already exists, default sources and mappings will not be added");
        return Ok(());
    }

    println!("Adding default sources and mappings to new config file");
    editor::add_source(config_path, DEFAULT_SOURCE_NAME, DEFAULT_SOURCE_URL)?;
    editor::add_mapping(config_path, DEFAULT_SOURCE_NAME, DEFAULT_MAPPING_PATTERN)?;
    Ok(())
}
