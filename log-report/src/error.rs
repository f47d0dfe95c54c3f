use std::path::PathBuf;

use thiserror::Error;

/// Failures while retrieving the raw log text.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("log from {origin} is not valid UTF-8: {source}")]
    Decode {
        origin: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to retrieve log: {0}")]
    Fetch(#[from] FetchError),

    #[error("line {line}: expected 5 fields, found {found}")]
    MalformedRecord { line: u64, found: usize },

    #[error("line {line}: invalid timestamp {value:?}")]
    InvalidTimestamp { line: u64, value: String },

    #[error("unreadable CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not read log source from stdin: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("could not encode report: {0}")]
    Render(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
