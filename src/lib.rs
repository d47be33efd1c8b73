//! # nuget-login Library
//!
//! This library provides the core functionality for resolving, creating and
//! incrementally editing NuGet configuration files. It is designed to be used
//! by the `nuget-login` command-line tool but can also be integrated into
//! other applications that need to register package sources programmatically.
//!
//! ## Quick Example
//!
//! ```no_run
//! use nuget_login::{editor, naming, path};
//!
//! # fn main() -> nuget_login::error::Result<()> {
//! // Resolve the config file to edit (empty hint = default location)
//! let config = path::resolve_config_path("");
//!
//! // Work out the canonical name for a feed URL
//! let name = naming::resolve_source_name(&config, "https://feeds.example.com/v3/index.json")?;
//!
//! // Register the source and restrict it to a pattern
//! editor::add_source(&config, &name, "https://feeds.example.com/v3/index.json")?;
//! editor::add_mapping(&config, &name, "Example.*")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! - **Path resolution (`path`)**: turns the user's `--target` hint (empty, a
//!   file, or a directory) into the single config path to operate on.
//! - **Document (`document`)**: the owned XML tree with load/save and the
//!   order-preserving mutation primitives; sections are created lazily and
//!   merged into, never overwritten (credentials excepted, which replace).
//! - **Name resolution (`naming`)**: maps a URL-or-name to the canonical
//!   source identifier, deriving one from the URL when nothing is registered.
//! - **Editing (`editor`)**: the load-or-create / mutate / persist entry
//!   points used by each CLI verb.
//!
//! Each CLI invocation reads (or synthesizes) the document once, mutates it in
//! memory and writes it back whole; no state survives between invocations.

pub mod defaults;
pub mod document;
pub mod editor;
pub mod error;
pub mod naming;
pub mod path;
