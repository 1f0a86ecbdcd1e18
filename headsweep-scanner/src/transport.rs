use crate::error::{Result, ScanError};
use reqwest::Client;
use reqwest::header::HeaderMap;
use std::future::Future;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// What a classifier gets to look at after a successful request.
#[derive(Debug, Clone, Default)]
pub struct FetchedResponse {
    pub url: String,
    pub status_code: u16,
    pub headers: HeaderMap,
    /// Only downloaded when the classifier asked for it.
    pub body: Option<String>,
}

/// Performs a single GET for the fetcher.
///
/// `HttpTransport` is the real thing; tests plug in canned responses.
pub trait Transport: Send + Sync + 'static {
    fn get(
        &self,
        url: &str,
        with_body: bool,
    ) -> impl Future<Output = Result<FetchedResponse>> + Send;
}

#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// `None` leaves reqwest's default in place, which never times out.
    pub timeout: Option<Duration>,
    pub accept_invalid_certs: bool,
    pub max_redirects: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            accept_invalid_certs: true,
            max_redirects: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::with_config(TransportConfig::default())
    }

    pub fn with_config(config: TransportConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .no_proxy()
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str, with_body: bool) -> Result<FetchedResponse> {
        let parsed =
            Url::parse(url).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", url, e)))?;

        debug!("GET {}", url);
        let response = self.client.get(parsed).send().await?;

        let status_code = response.status().as_u16();
        let headers = response.headers().clone();

        let body = if with_body {
            match response.text().await {
                Ok(text) => Some(text),
                Err(e) => {
                    debug!("Failed to read body of {}: {}", url, e);
                    Some(String::new())
                }
            }
        } else {
            None
        };

        Ok(FetchedResponse {
            url: url.to_string(),
            status_code,
            headers,
            body,
        })
    }
}
