use crate::artifacts::fetch::{FetchError, PageFetcher};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Where a URL from the article list points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    Remote(url::Url),
    Local(PathBuf),
}

impl PageSource {
    /// `http(s)` URLs are remote, `file` URLs and anything that is not an absolute URL
    /// are local paths.
    pub fn try_parse(url: &str) -> Result<Self, FetchError> {
        match url::Url::parse(url) {
            Ok(parsed) => match parsed.scheme() {
                "http" | "https" => Ok(PageSource::Remote(parsed)),
                "file" => parsed
                    .to_file_path()
                    .map(PageSource::Local)
                    .map_err(|_| FetchError::UnsupportedScheme(url.to_string())),
                _ => Err(FetchError::UnsupportedScheme(url.to_string())),
            },
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(PageSource::Local(PathBuf::from(url)))
            }
            Err(_) => Err(FetchError::UnsupportedScheme(url.to_string())),
        }
    }
}

/// Fetches pages over HTTP(S), or from disk for `file` URLs and plain paths.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(HttpFetcher { client })
    }

    async fn fetch_remote(&self, url: url::Url) -> Result<String, FetchError> {
        let request_error = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(request_error)
    }

    async fn fetch_local(&self, path: PathBuf) -> Result<String, FetchError> {
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FetchError::Local {
                path: path.display().to_string(),
                source,
            })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching: {}", url);

        match PageSource::try_parse(url)? {
            PageSource::Remote(url) => self.fetch_remote(url).await,
            PageSource::Local(path) => self.fetch_local(path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::{FileWriteStr, PathChild};
    use rstest::rstest;

    #[rstest]
    #[case("https://en.wikipedia.org/wiki/Hash_table")]
    #[case("http://localhost:8080/page")]
    fn web_urls_are_remote(#[case] url: &str) {
        assert!(matches!(
            PageSource::try_parse(url).unwrap(),
            PageSource::Remote(_)
        ));
    }

    #[rstest]
    #[case("pages/hash_table.html", "pages/hash_table.html")]
    #[case("/tmp/hash_table.html", "/tmp/hash_table.html")]
    #[case("file:///tmp/hash_table.html", "/tmp/hash_table.html")]
    fn paths_and_file_urls_are_local(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(
            PageSource::try_parse(url).unwrap(),
            PageSource::Local(PathBuf::from(expected))
        );
    }

    #[test]
    fn other_schemes_are_rejected() {
        assert!(matches!(
            PageSource::try_parse("ftp://example.org/page"),
            Err(FetchError::UnsupportedScheme(_))
        ));
    }

    #[tokio::test]
    async fn reads_local_pages() {
        let dir = TempDir::new().unwrap();
        let page = dir.child("page.html");
        page.write_str("<html></html>").unwrap();
        let fetcher = HttpFetcher::new(Duration::from_secs(1)).unwrap();

        let html = fetcher
            .fetch(&page.path().display().to_string())
            .await
            .unwrap();

        assert_eq!(html, "<html></html>");
    }

    #[tokio::test]
    async fn missing_local_page_is_a_fetch_error() {
        let dir = TempDir::new().unwrap();
        let fetcher = HttpFetcher::new(Duration::from_secs(1)).unwrap();

        let error = fetcher
            .fetch(&dir.path().join("missing.html").display().to_string())
            .await
            .unwrap_err();

        assert!(matches!(error, FetchError::Local { .. }));
    }
}
