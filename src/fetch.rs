// src/fetch.rs
//! Fetching careers pages. A fetch failure is a distinct outcome from a
//! page that yields zero jobs, so "site is down" never reads as "site
//! has no matching postings".

use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::listing::PageInput;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: StatusCode },
    #[error("could not read body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(timeout_seconds: u64) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetch one careers page and bundle it with its company for the
    /// extraction pipeline.
    pub async fn fetch_page(&self, company: &str, url: &str) -> Result<PageInput, FetchError> {
        info!(company, url, "fetching careers page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request { url: url.to_string(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status });
        }

        let html = response
            .text()
            .await
            .map_err(|source| FetchError::Body { url: url.to_string(), source })?;

        Ok(PageInput { company: company.to_string(), url: url.to_string(), html })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_names_url_and_code() {
        let err = FetchError::Status {
            url: "https://acme.com/careers".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        let message = err.to_string();
        assert!(message.contains("https://acme.com/careers"));
        assert!(message.contains("404"));
    }
}
