//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - The `Transport` seam the pipeline fetches through
//! - Building the reqwest client with user agent and request timeout
//! - Error classification (timeout, connection failure, other)

use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A response received from the transport
///
/// Every status code is a response; whether it yields links is decided by
/// the pipeline.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// Final URL after redirects
    pub final_url: Url,
    /// HTTP status code
    pub status: u16,
    /// Page body content
    pub body: String,
}

impl FetchResponse {
    /// Returns true for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failures. None of them is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("HTTP error for {url}: {message}")]
    Http { url: String, message: String },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

impl FetchError {
    /// Classifies a reqwest error the same way for requests and bodies
    fn from_reqwest(url: &Url, error: reqwest::Error) -> Self {
        let url = url.to_string();
        if error.is_timeout() {
            FetchError::Timeout { url }
        } else if error.is_connect() {
            FetchError::Connect {
                url,
                message: error.to_string(),
            }
        } else if error.is_body() || error.is_decode() {
            FetchError::Body {
                url,
                message: error.to_string(),
            }
        } else {
            FetchError::Http {
                url,
                message: error.to_string(),
            }
        }
    }
}

/// Fetches one URL
///
/// Implementations must be shareable across workers. The returned future is
/// `Send` so each fetch can run on any runtime thread.
pub trait Transport: Send + Sync + 'static {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchResponse, FetchError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The User-Agent header value
/// * `timeout` - Whole-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Transport over a reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent, timeout)?,
        })
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchResponse, FetchError>> + Send {
        let request = self.client.get(url.clone()).send();
        let url = url.clone();

        async move {
            let response = request
                .await
                .map_err(|e| FetchError::from_reqwest(&url, e))?;

            let status = response.status().as_u16();
            let final_url = response.url().clone();
            let body = response
                .text()
                .await
                .map_err(|e| FetchError::from_reqwest(&url, e))?;

            Ok(FetchResponse {
                final_url,
                status,
                body,
            })
        }
    }
}
