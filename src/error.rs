use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SummaryError>;

/// Failures surfaced at startup; the scan loop itself has no recoverable
/// error conditions.
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("cannot open {path:?}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("cannot stat {path:?}: {source}")]
    Stat { path: PathBuf, source: io::Error },

    #[error("{path:?} is not a regular file")]
    NotAFile { path: PathBuf },

    #[error("cannot map {path:?}: {source}")]
    Map { path: PathBuf, source: io::Error },

    #[error("cannot write summary: {0}")]
    Output(#[from] io::Error),
}
