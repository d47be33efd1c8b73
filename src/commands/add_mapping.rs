//! # Add-Mapping Command Implementation
//!
//! This module implements the `add-mapping` subcommand, which restricts a
//! source to the packages matching a glob pattern.
//!
//! The first positional argument may be a registered source's name or its URL;
//! either resolves to the canonical identifier before the mapping is written.

use anyhow::Result;
use clap::Args;

use nuget_login::{editor, naming, path};

use crate::commands::{seed_defaults, GlobalArgs};

/// Add a source mapping to the configuration file
#[derive(Args, Debug)]
pub struct AddMappingArgs {
    /// Name or URL of the source the mapping applies to
    #[arg(value_name = "NAME_OR_URL")]
    pub name_or_url: String,

    /// Glob pattern of package ids served by the source
    #[arg(value_name = "PATTERN")]
    pub pattern: String,
}

/// Execute the `add-mapping` command.
pub fn execute(args: AddMappingArgs, globals: &GlobalArgs) -> Result<()> {
    let config_path = path::resolve_config_path(&globals.target);
    println!("Using config file: {}", config_path.display());

    let config_existed = config_path.exists();

    let name = naming::resolve_source_name(&config_path, &args.name_or_url)?;

    seed_defaults(&config_path, globals, config_existed)?;

    println!("Adding mapping for {} to {}..", name, args.pattern);
    editor::add_mapping(&config_path, &name, &args.pattern)?;

    println!("Successfully added mapping for {} to {}", name, args.pattern);
    Ok(())
}
