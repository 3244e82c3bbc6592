//! Per-file fatal errors.

use marv_translator::TranslateError;
use std::path::PathBuf;
use thiserror::Error;

/// The parser back-end could not produce ESTree for a file.
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("cannot run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("{} is not ESTree JSON: {source}", .path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A failure that stops processing of one file. Other files continue.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Frontend(#[from] FrontendError),

    #[error("{}: {source}", .path.display())]
    Translate {
        path: PathBuf,
        #[source]
        source: TranslateError,
    },

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
