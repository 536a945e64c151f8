//! svn-authors command-line tool.
//!
//! Reads the output of `svn log -q` on stdin and prints one identity mapping
//! per distinct author on stdout, sorted, ready to be used as a `git svn`
//! authors file:
//!
//! ```text
//! svn log -q https://svn.example.com/repo | svn-authors > authors.txt
//! ```

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use svnauthors_core::{AuthorsFile, OutputFormat};

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// Extract a sorted authors file from `svn log -q` output on stdin.
#[derive(Parser, Debug)]
#[command(name = "svn-authors", version, about)]
struct Cli {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::AuthorsFile)]
    format: Format,

    /// Use `<author>@<DOMAIN>` as placeholder email instead of the bare author.
    #[arg(long, value_name = "DOMAIN")]
    email_domain: Option<String>,

    /// Log debug details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `author = author <author>` lines, as read by `git svn --authors-file`.
    AuthorsFile,
    /// TOML identity mapping file with an `[authors]` table.
    Toml,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Stdout carries the mapping, so logs go to stderr only.
    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut file = AuthorsFile::new();
    if let Some(domain) = cli.email_domain {
        file = file.with_email_domain(domain);
    }
    let format = match cli.format {
        Format::AuthorsFile => OutputFormat::AuthorsFile,
        Format::Toml => OutputFormat::Toml,
    };

    let mut out = BufWriter::new(io::stdout().lock());
    let authors = file
        .convert(io::stdin().lock(), format, &mut out)
        .context("failed to extract svn authors")?;
    out.flush().context("failed to write to stdout")?;

    debug!(count = authors.len(), "collected authors");
    Ok(())
}
