//! Outbound retrieval of text: writeup bodies, `weather` and `curl`.

use crate::utils::url::ResourceLocation;
use async_trait::async_trait;
use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

#[derive(Debug)]
pub enum FetchError {
    /// The request never produced a response.
    Transport { url: String, source: reqwest::Error },
    /// The server answered with a non-success status.
    Status { url: String, status: u16 },
    /// A local content file could not be read.
    Io { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport { url, source } => write!(f, "request to {url} failed: {source}"),
            FetchError::Status { url, status } => write!(f, "{url} returned HTTP {status}"),
            FetchError::Io { path, source } => {
                write!(f, "could not read {}: {}", path.display(), source)
            }
        }
    }
}

impl StdError for FetchError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            FetchError::Transport { source, .. } => Some(source),
            FetchError::Io { source, .. } => Some(source),
            FetchError::Status { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body if the status was 2xx, otherwise a `Status` error.
    pub fn into_success_text(self) -> Result<String, FetchError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(FetchError::Status {
                url: self.url,
                status: self.status,
            })
        }
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Single GET returning whatever the server sent, whatever the status.
    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError>;

    /// Read a local UTF-8 file.
    async fn read_local(&self, path: &std::path::Path) -> Result<String, FetchError>;

    /// Load a writeup body. Non-success statuses count as failures.
    async fn fetch_resource(&self, location: &ResourceLocation) -> Result<String, FetchError> {
        match location {
            ResourceLocation::Remote(url) => self.get(url).await?.into_success_text(),
            ResourceLocation::Local(path) => self.read_local(path).await,
        }
    }
}

/// reqwest-backed fetcher used outside tests.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("termblog/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        debug!(url, "GET");
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;
        Ok(FetchResponse {
            url: url.to_string(),
            status,
            body,
        })
    }

    async fn read_local(&self, path: &std::path::Path) -> Result<String, FetchError> {
        debug!(path = %path.display(), "Reading local content");
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FetchError::Io {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn non_success_status_is_an_error() {
        let response = FetchResponse {
            url: "https://x.test/a".to_string(),
            status: 404,
            body: "missing".to_string(),
        };
        let err = response.into_success_text().unwrap_err();
        assert_eq!(err.to_string(), "https://x.test/a returned HTTP 404");
    }

    #[test]
    fn success_status_yields_body() {
        let response = FetchResponse {
            url: "https://x.test/a".to_string(),
            status: 204,
            body: String::new(),
        };
        assert_eq!(response.into_success_text().unwrap(), "");
    }

    #[tokio::test]
    async fn reads_local_resources() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("post.md");
        std::fs::write(&path, "# Hello").unwrap();

        let fetcher = HttpFetcher::new(Duration::from_secs(1)).unwrap();
        let body = fetcher
            .fetch_resource(&ResourceLocation::Local(path))
            .await
            .unwrap();
        assert_eq!(body, "# Hello");

        let missing = fetcher
            .fetch_resource(&ResourceLocation::Local(dir.path().join("missing.md")))
            .await;
        assert!(matches!(missing, Err(FetchError::Io { .. })));
    }
}
