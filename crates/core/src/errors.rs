//! Error types for the svn-authors core library.
//!
//! Each stage has its own error type derived with `thiserror`, and a
//! top-level [`CoreError`] enum unifies them for callers that want a single
//! error type.
//!
//! Malformed log lines are never errors: the parser skips them.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the entire core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

/// Errors while reading the `svn log` stream.
#[derive(Debug, Error)]
pub enum InputError {
    /// The underlying reader failed before reaching end of input.
    #[error("failed to read svn log input: {0}")]
    IoError(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Render errors
// ---------------------------------------------------------------------------

/// Errors while producing the authors mapping output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The TOML mapping document could not be serialized.
    #[error("failed to serialize author mapping: {0}")]
    SerializeError(String),

    /// Writing the rendered output failed.
    #[error("failed to write author mapping: {0}")]
    IoError(#[from] std::io::Error),
}
