// fetch.rs - Downloads ConwayLife wiki pages with time and size limits

use std::time::Duration;

use conway::RecoverableError;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url, redirect};
use thiserror::Error;
use tracing::debug;

pub const WIKI_HOST: &str = "conwaylife.com";

const MAX_REDIRECTS: usize = 5;

/// Only `https://conwaylife.com/wiki/...` pages are fetched.
pub fn validate_wiki_url(raw: &str) -> bool {
    Url::parse(raw).is_ok_and(|url| is_wiki_url(&url))
}

fn is_wiki_url(url: &Url) -> bool {
    url.scheme() == "https" && url.host_str() == Some(WIKI_HOST) && url.path().starts_with("/wiki/")
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("pattern url rejected: {0}")]
    RejectedUrl(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("unexpected http status: {0}")]
    Status(StatusCode),
    #[error("unsupported content-type: {0:?}")]
    ContentType(String),
    #[error("response size exceeds {limit} bytes")]
    TooLarge { limit: u64 },
    #[error("response is not valid utf-8")]
    Encoding,
}

impl From<FetchError> for RecoverableError {
    fn from(err: FetchError) -> Self {
        RecoverableError::Fetch(err.to_string())
    }
}

pub struct WikiLoader {
    client    : Client,
    timeout   : Duration,
    max_bytes : u64,
}

impl WikiLoader {
    pub fn new(timeout: Duration, max_bytes: u64) -> Result<Self, FetchError> {
        // never let a redirect leave the wiki
        let policy = redirect::Policy::custom(|attempt| {
            if attempt.previous().len() >= MAX_REDIRECTS {
                attempt.error("too many redirects")
            } else if is_wiki_url(attempt.url()) {
                attempt.follow()
            } else {
                attempt.stop()
            }
        });
        let client = Client::builder()
            .timeout(timeout)
            .redirect(policy)
            .build()
            .map_err(FetchError::Request)?;
        Ok(Self { client, timeout, max_bytes })
    }

    /// Fetches a wiki page as text. The URL is checked before any network
    /// access.
    pub async fn load(&self, url: &str) -> Result<String, FetchError> {
        if !validate_wiki_url(url) {
            return Err(FetchError::RejectedUrl(url.to_string()));
        }
        self.fetch(url).await
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut response = self.client.get(url).send().await.map_err(|err| self.classify(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("text/") {
            return Err(FetchError::ContentType(content_type));
        }

        let limit = self.max_bytes;
        if let Some(length) = response.content_length()
            && length > limit
        {
            return Err(FetchError::TooLarge { limit });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|err| self.classify(err))? {
            if (body.len() + chunk.len()) as u64 > limit {
                return Err(FetchError::TooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }
        debug!(url, bytes = body.len(), "pattern page downloaded");
        String::from_utf8(body).map_err(|_| FetchError::Encoding)
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Request(err)
        }
    }
}
