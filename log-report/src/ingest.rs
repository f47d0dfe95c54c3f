use std::{fmt, path::PathBuf, str::FromStr, time::Duration};

use tracing::info;

use crate::error::FetchError;

/// Where the raw log comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    Path(PathBuf),
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("log source is empty".into());
        }
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Self::Url(s.into()))
        } else {
            Ok(Self::Path(s.into()))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Retrieves the whole log as UTF-8 text. No retries.
pub async fn fetch(source: &Source, timeout: Duration) -> Result<String, FetchError> {
    let bytes = match source {
        Source::Url(url) => fetch_url(url, timeout).await?,
        Source::Path(path) => tokio::fs::read(path).await.map_err(|source| FetchError::Io {
            path: path.clone(),
            source,
        })?,
    };
    info!(%source, bytes = bytes.len(), "retrieved log");
    String::from_utf8(bytes).map_err(|e| FetchError::Decode {
        origin: source.to_string(),
        source: e,
    })
}

async fn fetch_url(url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
    let http = |source: reqwest::Error| FetchError::Http {
        url: url.to_string(),
        source,
    };
    info!(url, "downloading log");
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(http)?;
    let response = client.get(url).send().await.map_err(http)?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }
    let body = response.bytes().await.map_err(http)?;
    Ok(body.to_vec())
}
