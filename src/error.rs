//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `nuget-login` application. It uses the `thiserror` library to create an
//! `Error` enum covering all anticipated failure modes, providing clear and
//! descriptive error messages.
//!
//! The taxonomy is deliberately small:
//!
//! - **`NotFound`**: the config file is absent. Recoverable: every mutation
//!   entry point treats it as "start from an empty document", and name
//!   resolution falls back to URL derivation instead of scanning.
//! - **`Io`**: a permission, disk, or directory-creation failure. Fatal to the
//!   current invocation and reported with the failing path.
//! - **`Parse`**: malformed XML in an existing file, surfaced verbatim.
//! - **`Document`**: an in-memory tree manipulation failed.
//!
//! The `Result<T>` alias is used throughout the library to simplify function
//! signatures.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for nuget-login operations
#[derive(Error, Debug)]
pub enum Error {
    /// The config file does not exist at the given path.
    ///
    /// Callers that can start from an empty document catch this variant;
    /// everything else reports it.
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    /// An I/O error occurred while reading or writing the config file.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An existing config file contains malformed XML, or its root element is
    /// not `<configuration>`.
    #[error("Config parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// An in-memory document manipulation failed.
    #[error("Config document error: {message}")]
    Document { message: String },
}

impl Error {
    /// True when the error means "the file simply is not there".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
