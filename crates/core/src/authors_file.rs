//! Renderers for the collected author set.
//!
//! Two output formats are supported:
//!
//! - The `git svn` authors file, one identity mapping per line:
//!
//!   ```text
//!   alice = alice <alice>
//!   ```
//!
//! - The TOML identity mapping file:
//!
//!   ```toml
//!   [authors.alice]
//!   name = "alice"
//!   email = "alice"
//!   ```
//!
//! Both map every author onto itself, with the author (or
//! `author@domain` when an email domain is set) as placeholder address.
//! The authors file reproduces author bytes exactly; TOML is UTF-8 only, so
//! that format decodes non-UTF-8 names lossily.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CoreError, RenderError};
use crate::log_parser::{parse_authors, read_log, AuthorSet};

/// A single author entry in the TOML mapping file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorEntry {
    /// Git display name.
    pub name: String,
    /// Git email address.
    pub email: String,
}

/// Wrapper around the TOML mapping file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingFileData {
    /// The `[authors]` table mapping SVN username -> AuthorEntry.
    #[serde(default)]
    pub authors: BTreeMap<String, AuthorEntry>,
}

/// Output layout of the rendered mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `author = author <email>` lines.
    #[default]
    AuthorsFile,
    /// TOML `[authors]` table.
    Toml,
}

/// Renders an [`AuthorSet`] as an identity mapping.
#[derive(Debug, Clone, Default)]
pub struct AuthorsFile {
    /// Domain appended to each placeholder address.
    email_domain: Option<String>,
}

impl AuthorsFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive placeholder addresses as `author@domain`.
    pub fn with_email_domain(mut self, domain: impl Into<String>) -> Self {
        self.email_domain = Some(domain.into());
        self
    }

    /// The placeholder address for an author.
    pub fn email_for(&self, author: &[u8]) -> Vec<u8> {
        let mut email = author.to_vec();
        if let Some(domain) = &self.email_domain {
            email.push(b'@');
            email.extend_from_slice(domain.as_bytes());
        }
        email
    }

    /// One `<author> = <author> <<email>>` line per author, in ascending
    /// order, without trailing newlines.
    pub fn lines(&self, authors: &AuthorSet) -> Vec<Vec<u8>> {
        let lines: Vec<Vec<u8>> = authors
            .iter()
            .map(|author| {
                let mut line = Vec::with_capacity(author.len() * 3 + 6);
                line.extend_from_slice(author);
                line.extend_from_slice(b" = ");
                line.extend_from_slice(author);
                line.extend_from_slice(b" <");
                line.extend_from_slice(&self.email_for(author));
                line.push(b'>');
                line
            })
            .collect();
        debug!(count = lines.len(), "rendered authors file");
        lines
    }

    /// Write the authors file, one newline-terminated line per author.
    pub fn write_lines<W: Write>(
        &self,
        authors: &AuthorSet,
        mut out: W,
    ) -> Result<(), RenderError> {
        for line in self.lines(authors) {
            out.write_all(&line)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Build the TOML mapping table for the given authors.
    pub fn mapping(&self, authors: &AuthorSet) -> MappingFileData {
        let lossy = authors
            .iter()
            .filter(|author| std::str::from_utf8(author).is_err())
            .count();
        if lossy > 0 {
            warn!(
                count = lossy,
                "author names are not valid UTF-8, decoding lossily for TOML"
            );
        }

        let authors = authors
            .iter()
            .map(|author| {
                let name = String::from_utf8_lossy(author).into_owned();
                let email = String::from_utf8_lossy(&self.email_for(author)).into_owned();
                (name.clone(), AuthorEntry { name, email })
            })
            .collect();
        MappingFileData { authors }
    }

    /// Serialize the mapping as a TOML document.
    pub fn to_toml(&self, authors: &AuthorSet) -> Result<String, RenderError> {
        let data = self.mapping(authors);
        let toml_str = toml::to_string_pretty(&data)
            .map_err(|e| RenderError::SerializeError(e.to_string()))?;
        debug!(count = data.authors.len(), "rendered TOML author mapping");
        Ok(toml_str)
    }

    /// Write the authors in the requested format.
    pub fn write<W: Write>(
        &self,
        authors: &AuthorSet,
        format: OutputFormat,
        mut out: W,
    ) -> Result<(), RenderError> {
        match format {
            OutputFormat::AuthorsFile => self.write_lines(authors, out),
            OutputFormat::Toml => {
                out.write_all(self.to_toml(authors)?.as_bytes())?;
                Ok(())
            }
        }
    }

    /// Read a complete `svn log -q` stream, extract its authors and write
    /// the mapping. Returns the authors found.
    pub fn convert<R: Read, W: Write>(
        &self,
        reader: R,
        format: OutputFormat,
        out: W,
    ) -> Result<AuthorSet, CoreError> {
        let input = read_log(reader)?;
        let authors = parse_authors(&input);
        self.write(&authors, format, out)?;
        Ok(authors)
    }
}

/// Render the authors file lines with the author itself as address.
pub fn render(authors: &AuthorSet) -> Vec<Vec<u8>> {
    AuthorsFile::new().lines(authors)
}
