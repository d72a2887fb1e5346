//! CLI support for xqmql
//!
//! Provides programmatic access to the command-line functionality for
//! embedding in other tools.

mod translate;

pub use translate::{Emit, RunOptions, RunResult, execute};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Query could not be translated
    #[error("Translation error: {0}")]
    Translate(#[from] crate::TranslateError),

    /// Translated query could not be rendered
    #[error("Render error: {0}")]
    Render(#[from] crate::RenderError),

    /// IR could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No query provided
    #[error("No query provided. Pass it as an argument, use --file, or pipe it to stdin.")]
    NoInput,
}
