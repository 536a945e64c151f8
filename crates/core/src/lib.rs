//! svn-authors core library.
//!
//! Extracts the distinct commit authors from `svn log -q` output and renders
//! them as an identity mapping for SVN to Git migrations: either a `git svn`
//! authors file or a TOML identity mapping file.

pub mod authors_file;
pub mod errors;
pub mod log_parser;

// Re-exports for convenience.
pub use authors_file::{render, AuthorsFile, OutputFormat};
pub use errors::CoreError;
pub use log_parser::{parse_authors, read_log, AuthorSet};
