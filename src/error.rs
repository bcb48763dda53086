//! Error types for portage.
//!
//! All errors are fatal to the invocation: nothing is retried or recovered
//! internally. Each variant carries enough context (batch range, file path,
//! operation) to be surfaced verbatim to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Io(#[from] IoError),
}

/// Missing or invalid service configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("vault address is required (use --vault-addr or VAULT_ADDR env var)")]
    MissingAddr,

    #[error("vault token is required (use --vault-token or VAULT_TOKEN env var)")]
    MissingToken,

    #[error("batch limit must be at least 1")]
    InvalidBatchLimit,
}

/// Ambiguous or missing input selection.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot specify both --file and --text, choose one")]
    BothSources,

    #[error("must specify either --file or --text")]
    NoSource,
}

/// Remote transform failure: transport error, bad response shape, or a
/// payload that cannot be decoded.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid response format: {0} not found")]
    MissingField(&'static str),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("service returned {got} results for {expected} items")]
    ResultCountMismatch { expected: usize, got: usize },

    #[error("failed to decode plaintext: {0}")]
    Decode(String),

    #[error("decrypted payload is not valid UTF-8")]
    InvalidUtf8,

    /// Wraps a batch failure with the unit index range it covered.
    #[error("items {start}..{end}: {source}")]
    Batch {
        start: usize,
        end: usize,
        #[source]
        source: Box<TransformError>,
    },
}

impl TransformError {
    /// Attach the unit index range of the failing batch.
    pub fn in_batch(self, start: usize, end: usize) -> Self {
        TransformError::Batch {
            start,
            end,
            source: Box::new(self),
        }
    }
}

/// File read/write/mkdir failure, tagged with the path involved.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
