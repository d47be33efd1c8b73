//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::commands;

/// nuget-login - Register NuGet package sources, credentials and mappings
#[derive(Parser, Debug)]
#[command(name = "nuget-login")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Target config file or directory (default is $HOME/.nuget/NuGet.config)
    #[arg(short, long, global = true, value_name = "PATH", default_value = "")]
    target: String,

    /// Add default source and mapping (nuget.org) to new config files.
    /// Does not affect existing config files.
    #[arg(long, global = true)]
    with_defaults: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a package source to the config file, or default if not specified
    AddSource(commands::add_source::AddSourceArgs),

    /// Add a source mapping to the config file, or default if not specified
    AddMapping(commands::add_mapping::AddMappingArgs),

    /// Initialize a new config file
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let level = if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .init();

        let globals = commands::GlobalArgs {
            target: self.target,
            with_defaults: self.with_defaults,
        };

        match self.command {
            Commands::AddSource(args) => commands::add_source::execute(args, &globals),
            Commands::AddMapping(args) => commands::add_mapping::execute(args, &globals),
            Commands::Init(args) => commands::init::execute(args, &globals),
        }
    }
}
