//! Parser for the plain-text output of `svn log -q`.
//!
//! The quiet log format is a sequence of entries, each introduced by a
//! separator line and followed by a pipe-delimited header:
//!
//! ```text
//! ------------------------------------------------------------------------
//! r45 | author_name | 2020-01-01 10:00:00 +0000 (Wed, 01 Jan 2020)
//! ```
//!
//! Only the header directly after a separator is inspected. Anything that
//! does not look like a header is skipped without error.
//!
//! The log is handled as raw bytes throughout. On Windows `svn log` writes
//! in the console code page, so author names are not guaranteed to be UTF-8
//! and must come out byte for byte as they went in.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::io::Read;

use tracing::debug;

use crate::errors::InputError;

/// The line `svn log` prints between entries: exactly 72 hyphens.
pub const SEPARATOR: &str =
    "------------------------------------------------------------------------";

/// Opening delimiter of the author column.
const AUTHOR_OPEN: &[u8] = b"| ";
/// Closing delimiter of the author column.
const AUTHOR_CLOSE: &[u8] = b" |";

// ---------------------------------------------------------------------------
// AuthorSet
// ---------------------------------------------------------------------------

/// Distinct author names, kept in ascending byte order.
///
/// Authors are compared by their exact bytes: no decoding, no case folding
/// and no trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorSet {
    names: BTreeSet<Vec<u8>>,
}

impl AuthorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an author. Returns `false` if it was already present.
    pub fn insert(&mut self, author: impl Into<Vec<u8>>) -> bool {
        self.names.insert(author.into())
    }

    pub fn contains(&self, author: impl AsRef<[u8]>) -> bool {
        self.names.contains(author.as_ref())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate authors in ascending byte order.
    pub fn iter(&self) -> btree_set::Iter<'_, Vec<u8>> {
        self.names.iter()
    }
}

impl<'a> IntoIterator for &'a AuthorSet {
    type Item = &'a Vec<u8>;
    type IntoIter = btree_set::Iter<'a, Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

impl<S: Into<Vec<u8>>> FromIterator<S> for AuthorSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Read the whole log stream into memory.
pub fn read_log<R: Read>(mut reader: R) -> Result<Vec<u8>, InputError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    debug!(bytes = buf.len(), "read svn log input");
    Ok(buf)
}

/// Strip every carriage return, then split on line feeds.
///
/// Lines are not trimmed. Empty input yields a single empty line, and a
/// trailing newline yields a trailing empty line.
pub fn normalize(input: &[u8]) -> Vec<Vec<u8>> {
    let stripped: Vec<u8> = input.iter().copied().filter(|&b| b != b'\r').collect();
    stripped.split(|&b| b == b'\n').map(<[u8]>::to_vec).collect()
}

/// Collect the author of every header line that directly follows a
/// separator.
pub fn scan<I>(lines: I) -> AuthorSet
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut authors = AuthorSet::new();
    let mut separators = 0usize;
    let mut lines = lines.into_iter().enumerate().peekable();

    while let Some((_, line)) = lines.next() {
        let line: &[u8] = line.as_ref();
        if line != SEPARATOR.as_bytes() {
            continue;
        }
        separators += 1;

        // The header is only peeked so that a second separator right after
        // this one still opens an entry of its own.
        let Some((index, header)) = lines.peek() else {
            debug!("separator at end of input, no header follows");
            continue;
        };
        let header: &[u8] = header.as_ref();
        match extract_author(header) {
            Some(author) => {
                authors.insert(author);
            }
            None => debug!(line = *index + 1, "no author in header line, skipping"),
        }
    }

    debug!(separators, count = authors.len(), "scanned svn log");
    authors
}

/// Extract the author column from a header line such as
/// `r45 | author_name | 2020-01-01 ...`.
///
/// The author is the text between the first `"| "` and the first `" |"`
/// after it, returned verbatim. Returns `None` if either delimiter is
/// missing.
pub fn extract_author(header: &[u8]) -> Option<&[u8]> {
    let start = find(header, AUTHOR_OPEN)? + AUTHOR_OPEN.len();
    let rest = &header[start..];
    let end = find(rest, AUTHOR_CLOSE)?;
    Some(&rest[..end])
}

/// Normalize and scan a complete log transcript.
pub fn parse_authors(input: &[u8]) -> AuthorSet {
    scan(normalize(input))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
