//! End-to-end tests for author extraction over `svn log -q` transcripts.
//!
//! These tests drive the public API the way the binary does: read the raw
//! log, parse the author set, and render the authors file.

use std::io::Write;

use svnauthors_core::log_parser::SEPARATOR;
use svnauthors_core::{parse_authors, read_log, render, AuthorsFile, OutputFormat};

// ===========================================================================
// Helpers
// ===========================================================================

fn entry(rev: u32, author: &str) -> String {
    format!(
        "{}\nr{} | {} | 2020-01-{:02} 10:00:00 +0000 (Wed, 01 Jan 2020) | 1 line\nmessage\n",
        SEPARATOR, rev, author, rev
    )
}

fn log_of(authors: &[&str]) -> String {
    authors
        .iter()
        .enumerate()
        .map(|(i, author)| entry(i as u32 + 1, author))
        .collect()
}

fn authors_file(input: &str) -> Vec<String> {
    render(&parse_authors(input.as_bytes()))
        .into_iter()
        .map(|line| String::from_utf8(line).unwrap())
        .collect()
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn test_two_authors() {
    let input = log_of(&["alice", "bob"]);
    assert_eq!(
        authors_file(&input),
        vec!["alice = alice <alice>", "bob = bob <bob>"]
    );
}

#[test]
fn test_repeated_author_listed_once() {
    let input = log_of(&["alice", "bob", "alice"]);
    assert_eq!(
        authors_file(&input),
        vec!["alice = alice <alice>", "bob = bob <bob>"]
    );
}

#[test]
fn test_windows_line_endings() {
    let unix = log_of(&["alice", "bob"]);
    let windows = unix.replace('\n', "\r\n");
    assert_eq!(authors_file(&windows), authors_file(&unix));
}

#[test]
fn test_truncated_header_is_skipped() {
    let input = format!(
        "{}{}\nr3 | carol\nmessage\n{}",
        log_of(&["alice"]),
        SEPARATOR,
        entry(4, "dave")
    );
    assert_eq!(
        authors_file(&input),
        vec!["alice = alice <alice>", "dave = dave <dave>"]
    );
}

#[test]
fn test_empty_input() {
    assert!(authors_file("").is_empty());
}

#[test]
fn test_trailing_separator_without_newline() {
    let input = format!("{}{}", log_of(&["alice", "bob"]), SEPARATOR);
    assert_eq!(
        authors_file(&input),
        vec!["alice = alice <alice>", "bob = bob <bob>"]
    );
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_author_appears_once_for_any_repeat_count() {
    for repeats in 1..=5 {
        let names = vec!["alice"; repeats];
        let input = log_of(&names);
        assert_eq!(authors_file(&input), vec!["alice = alice <alice>"]);
    }
}

#[test]
fn test_output_sorted_by_byte_order() {
    let input = log_of(&["zoe", "Bob", "alice", "_svc", "Émile", "bob", "10x"]);
    let authors: Vec<String> = parse_authors(input.as_bytes())
        .iter()
        .map(|author| String::from_utf8(author.clone()).unwrap())
        .collect();

    let mut expected = authors.clone();
    expected.sort();
    expected.dedup();
    assert_eq!(authors, expected);
    assert_eq!(
        authors,
        vec!["10x", "Bob", "_svc", "alice", "bob", "zoe", "Émile"]
    );
}

#[test]
fn test_pipe_free_header_does_not_stop_parsing() {
    let input = format!(
        "{}{}\nnot a header at all\n{}",
        log_of(&["alice"]),
        SEPARATOR,
        entry(3, "bob")
    );
    assert_eq!(
        authors_file(&input),
        vec!["alice = alice <alice>", "bob = bob <bob>"]
    );
}

#[test]
fn test_trailing_separator_matches_input_without_it() {
    let base = log_of(&["carol", "alice"]);
    let with_separator = format!("{}{}", base, SEPARATOR);
    let with_separator_newline = format!("{}{}\n", base, SEPARATOR);
    assert_eq!(authors_file(&with_separator), authors_file(&base));
    assert_eq!(authors_file(&with_separator_newline), authors_file(&base));
}

#[test]
fn test_message_lines_are_ignored() {
    let input = format!(
        "{}\nr1 | alice | 2020-01-01 | 2 lines\n\nr99 | mallory | pasted header\n{}\n",
        SEPARATOR, SEPARATOR
    );
    assert_eq!(authors_file(&input), vec!["alice = alice <alice>"]);
}

#[test]
fn test_code_page_authors_kept_byte_for_byte() {
    let mut input = Vec::new();
    let headers: [(u32, &[u8]); 3] = [(1, b"M\xfcller"), (2, b"M\xf6ller"), (3, b"M\xfcller")];
    for (rev, author) in headers {
        input.extend_from_slice(format!("{}\r\nr{} | ", SEPARATOR, rev).as_bytes());
        input.extend_from_slice(author);
        input.extend_from_slice(b" | 2020-01-01 10:00:00 +0000 | 1 line\r\nmessage\r\n");
    }

    let bytes = read_log(input.as_slice()).unwrap();
    assert_eq!(
        render(&parse_authors(&bytes)),
        vec![
            b"M\xf6ller = M\xf6ller <M\xf6ller>".to_vec(),
            b"M\xfcller = M\xfcller <M\xfcller>".to_vec(),
        ]
    );
}

// ===========================================================================
// Readers and formats
// ===========================================================================

#[test]
fn test_read_log_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(log_of(&["bob", "alice"]).as_bytes()).unwrap();

    let bytes = read_log(std::fs::File::open(file.path()).unwrap()).unwrap();
    assert_eq!(
        render(&parse_authors(&bytes)),
        vec![
            b"alice = alice <alice>".to_vec(),
            b"bob = bob <bob>".to_vec()
        ]
    );
}

#[test]
fn test_toml_mapping_from_log() {
    let authors = parse_authors(log_of(&["bob", "alice", "bob"]).as_bytes());
    let file = AuthorsFile::new().with_email_domain("example.com");
    let data = file.mapping(&authors);

    assert_eq!(
        data.authors.keys().collect::<Vec<_>>(),
        vec!["alice", "bob"]
    );
    assert_eq!(data.authors["bob"].email, "bob@example.com");
    assert!(file.to_toml(&authors).unwrap().contains("bob@example.com"));
}

#[test]
fn test_convert_toml_from_reader() {
    let input = log_of(&["carol", "alice"]);
    let mut out = Vec::new();
    let found = AuthorsFile::new()
        .convert(input.as_bytes(), OutputFormat::Toml, &mut out)
        .unwrap();

    assert_eq!(found.len(), 2);
    let toml_str = String::from_utf8(out).unwrap();
    assert!(toml_str.contains("email = \"carol\""));
}
