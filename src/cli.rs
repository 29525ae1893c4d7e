//! # Command Line
//!
//! Scripted access to the post store. Each subcommand runs exactly one store
//! operation and prints its result to the given writer, so the whole module
//! can be driven from tests with in-memory buffers.

use std::fmt;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;
use log::{info, warn};
use serde::Serialize;

use crate::core::config::ResolvedConfig;
use crate::core::post::{self, Draft, DraftError, Stamp};
use crate::core::store::{PostStore, StoreError};

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a post. Content is read from stdin when --content is omitted.
    New {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        tags: String,
        #[arg(long)]
        content: Option<String>,
    },
    /// Add a dated entry to an existing post
    Append {
        filename: String,
        #[arg(long)]
        content: Option<String>,
        /// Entry timestamp, "YYYY-MM-DD HH:MM:SS" (default: now)
        #[arg(long)]
        at: Option<String>,
    },
    /// Print a post
    Show { filename: String },
    /// List posts, optionally filtered by a case-insensitive regex
    List {
        query: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Copy a post into a directory
    Download {
        filename: String,
        /// Destination directory (default: the configured download dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum CliError {
    Store(StoreError),
    Invalid(DraftError),
    UnknownPost(String),
    BadTimestamp(String),
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Store(e) => write!(f, "{}", e),
            CliError::Invalid(e) => write!(f, "{}", e),
            CliError::UnknownPost(name) => write!(f, "no post named '{}'", name),
            CliError::BadTimestamp(s) => {
                write!(f, "invalid timestamp '{}' (expected YYYY-MM-DD HH:MM:SS)", s)
            }
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Store(e) => Some(e),
            CliError::Invalid(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::UnknownPost(_) | CliError::BadTimestamp(_) => None,
        }
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        CliError::Store(e)
    }
}

impl From<DraftError> for CliError {
    fn from(e: DraftError) -> Self {
        CliError::Invalid(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

// ============================================================================
// Commands
// ============================================================================

/// One row of `list --json`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PostSummary {
    pub filename: String,
    pub title: String,
}

pub fn execute(
    command: Command,
    config: &ResolvedConfig,
    input: &mut impl Read,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let store = PostStore::new(&config.posts_dir);
    info!("Running {:?}", command);
    match command {
        Command::New {
            title,
            category,
            tags,
            content,
        } => {
            let draft = Draft {
                title,
                category,
                tags,
                content: content_or_input(content, input)?,
            };
            let path = new_post(&store, &draft, &Stamp::now())?;
            writeln!(out, "{}", path.display())?;
        }
        Command::Append {
            filename,
            content,
            at,
        } => {
            let stamp = match at {
                Some(s) => Stamp::parse_combined(&s).map_err(|_| CliError::BadTimestamp(s))?,
                None => Stamp::now(),
            };
            let content = content_or_input(content, input)?;
            let path = append_entry(&store, &filename, &content, &stamp)?;
            writeln!(out, "{}", path.display())?;
        }
        Command::Show { filename } => {
            out.write_all(store.load(&filename)?.as_bytes())?;
        }
        Command::List { query, json } => {
            let posts = store.list(query.as_deref())?;
            if json {
                let summaries: Vec<PostSummary> = posts
                    .into_iter()
                    .map(|filename| PostSummary {
                        title: post::title_from_filename(&filename),
                        filename,
                    })
                    .collect();
                writeln!(out, "{}", serde_json::to_string_pretty(&summaries)?)?;
            } else {
                for name in posts {
                    writeln!(out, "{}", name)?;
                }
            }
        }
        Command::Download { filename, out: dir } => {
            let dest_dir = dir.as_deref().unwrap_or(&config.download_dir);
            let path = download(&store, &filename, dest_dir)?;
            writeln!(out, "{}", path.display())?;
        }
    }
    Ok(())
}

pub fn new_post(store: &PostStore, draft: &Draft, stamp: &Stamp) -> Result<PathBuf, CliError> {
    draft.validate()?;
    if store.exists(&draft.filename()) {
        warn!("Replacing existing post {}", draft.filename());
    }
    Ok(store.create(draft, stamp)?)
}

/// Only existing posts may be appended to; the store would otherwise create
/// a file without a header.
pub fn append_entry(
    store: &PostStore,
    filename: &str,
    content: &str,
    stamp: &Stamp,
) -> Result<PathBuf, CliError> {
    post::validate_entry(content)?;
    if !store.exists(filename) {
        return Err(CliError::UnknownPost(filename.to_string()));
    }
    Ok(store.append(filename, content, stamp)?)
}

pub fn download(store: &PostStore, filename: &str, dest_dir: &Path) -> Result<PathBuf, CliError> {
    if !store.exists(filename) {
        return Err(CliError::UnknownPost(filename.to_string()));
    }
    Ok(store.export(filename, dest_dir)?)
}

/// Use the flag if given, else all of `input` minus one trailing newline.
fn content_or_input(content: Option<String>, input: &mut impl Read) -> Result<String, CliError> {
    if let Some(content) = content {
        return Ok(content);
    }
    let mut buf = String::new();
    input.read_to_string(&mut buf)?;
    let trimmed = buf
        .strip_suffix("\r\n")
        .or_else(|| buf.strip_suffix('\n'))
        .unwrap_or(&buf);
    Ok(trimmed.to_string())
}
