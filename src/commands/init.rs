//! # Init Command Implementation
//!
//! This module implements the `init` subcommand, which creates a new, empty
//! config file at the resolved target path. An existing file is never
//! touched, so `init` is safe to run repeatedly.
//!
//! With the global `--with-defaults` flag a brand-new file is additionally
//! seeded with the well-known public registry source and a wildcard mapping.

use anyhow::Result;
use clap::Args;

use nuget_login::{editor, path};

use crate::commands::{seed_defaults, GlobalArgs};

/// Initialize a new config file
#[derive(Args, Debug)]
pub struct InitArgs {}

/// Execute the `init` command.
pub fn execute(_args: InitArgs, globals: &GlobalArgs) -> Result<()> {
    let config_path = path::resolve_config_path(&globals.target);
    println!("Initializing config file: {}", config_path.display());

    let config_existed = config_path.exists();

    if !config_existed {
        editor::init(&config_path)?;
    }

    seed_defaults(&config_path, globals, config_existed)?;

    if globals.with_defaults && !config_existed {
        println!(
            "Successfully added default sources and mappings to {}",
            config_path.display()
        );
    }

    Ok(())
}
