use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the `post` command.
///
/// Every variant is fatal: the tool halts on the first problem, emits an
/// error-level log record, and reports a single message on stderr.
#[derive(Debug, Error)]
pub enum Error {
    /// The invocation is missing a required content source or carries an
    /// empty required value. Raised before any network call.
    #[error("configuration error: {0}")]
    Config(String),

    /// A message file could not be read.
    #[error("failed to read message file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Slack rejected a post call, or the call could not be completed.
    #[error("failed to post message to {channel}: {detail}")]
    Api { channel: String, detail: String },
}

pub type Result<T> = std::result::Result<T, Error>;
