//! Page fetching
//!
//! The producing run only needs "URL in, HTML out". [`PageFetcher`] is that seam;
//! [`http_fetcher::HttpFetcher`] is the implementation the binary uses.

pub mod http_fetcher;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to download {url} ({source})")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to download {url} (status {status})")]
    Status { url: String, status: u16 },

    #[error("failed to read local file {path} ({source})")]
    Local {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported URL scheme for {0}")]
    UnsupportedScheme(String),
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
