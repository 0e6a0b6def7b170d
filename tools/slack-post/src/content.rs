//! Message content resolution.
//!
//! Root and reply text comes from a literal flag value or from a file.
//! File contents are read in full and trimmed of surrounding whitespace.
//! Reply files are resolved at post time, so a failing read leaves the
//! replies posted before it in place.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A reply's text, either given inline or read from a file.
#[derive(Debug, Clone)]
pub enum ReplySource {
    Literal(String),
    File(PathBuf),
}

impl ReplySource {
    /// Resolves the reply text, reading the file if necessary.
    pub fn resolve(&self) -> Result<String> {
        match self {
            Self::Literal(text) => Ok(text.clone()),
            Self::File(path) => read_message_file(path),
        }
    }
}

/// Reads a message file, trimming leading and trailing whitespace.
pub fn read_message_file(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(raw.trim().to_string())
}

/// Resolves the root message text from the invocation options.
///
/// The literal value wins when both sources are supplied.
pub fn resolve_root_message(message: Option<&str>, message_file: Option<&Path>) -> Result<String> {
    let text = match (message, message_file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => read_message_file(path)?,
        (None, None) => {
            return Err(Error::Config(
                "either --message or --message-file must be provided".into(),
            ));
        }
    };

    if text.trim().is_empty() {
        return Err(Error::Config("root message is empty".into()));
    }

    Ok(text)
}

/// Builds the ordered reply sequence: literal replies first, then
/// file-sourced replies, each group in declared order.
pub fn reply_sources(literals: &[String], files: &[PathBuf]) -> Vec<ReplySource> {
    literals
        .iter()
        .cloned()
        .map(ReplySource::Literal)
        .chain(files.iter().cloned().map(ReplySource::File))
        .collect()
}
