//! # Add-Source Command Implementation
//!
//! This module implements the `add-source` subcommand, which registers a
//! package source in the config file.
//!
//! ## Functionality
//!
//! - **Positional forms**: a single URL (the source name is resolved or
//!   derived from it) or an explicit name followed by a URL.
//! - **Credentials**: optional `--username`/`--password` pair, required
//!   together; when present they are stored for the source after it is added.
//! - **Bootstrap**: honors the global `--with-defaults` flag for brand-new
//!   config files.

use anyhow::Result;
use clap::Args;

use nuget_login::{editor, naming, path};

use crate::commands::{seed_defaults, GlobalArgs};

/// Add a package source to the configuration file
#[derive(Args, Debug)]
pub struct AddSourceArgs {
    /// Source URL, or source name when a URL is given as the second argument
    #[arg(value_name = "NAME_OR_URL")]
    pub name_or_url: String,

    /// Source URL when the first argument is a name
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Username for the source
    #[arg(short, long, requires = "password")]
    pub username: Option<String>,

    /// Password for the source
    #[arg(short, long, requires = "username")]
    pub password: Option<String>,
}

/// Execute the `add-source` command.
///
/// With a single positional argument the source name is resolved against the
/// existing config (or derived from the URL); with two it is used verbatim.
pub fn execute(args: AddSourceArgs, globals: &GlobalArgs) -> Result<()> {
    let config_path = path::resolve_config_path(&globals.target);
    println!("Using config file: {}", config_path.display());

    let config_existed = config_path.exists();

    // Name resolution runs against the config as the user left it, before any
    // default entries are seeded.
    let (name, source_url) = match &args.url {
        Some(url) => (args.name_or_url.clone(), url.clone()),
        None => {
            let name = naming::resolve_source_name(&config_path, &args.name_or_url)?;
            (name, args.name_or_url.clone())
        }
    };

    seed_defaults(&config_path, globals, config_existed)?;

    println!("Adding source {} to {}..", name, source_url);
    editor::add_source(&config_path, &name, &source_url)?;

    if let (Some(username), Some(password)) = (&args.username, &args.password) {
        println!("Adding package source credentials for {}..", name);
        editor::add_credentials(&config_path, &name, username, password)?;
        println!(
            "Successfully added source and credentials for {} to {}",
            name, source_url
        );
    } else {
        println!("Successfully added source {} to {}", name, source_url);
    }

    Ok(())
}
