// Shared fixtures for the scan and grouping tests
#![allow(dead_code)]

use headsweep_scanner::{
    FetchedResponse, HeaderRecord, Result, SECURITY_HEADERS, ScanError, SecurityHeaders, Transport,
    UrlRecord,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;

/// Canned responses keyed by full URL; anything else fails like a refused connection.
#[derive(Default)]
pub struct StubTransport {
    responses: HashMap<String, FetchedResponse>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `url` with every security header except `missing`.
    pub fn missing(mut self, url: &str, missing: &[&str]) -> Self {
        let mut headers = HeaderMap::new();
        for name in SECURITY_HEADERS.iter().filter(|h| !missing.contains(h)) {
            let name = HeaderName::from_bytes(name.as_bytes()).unwrap();
            headers.insert(name, HeaderValue::from_static("1"));
        }
        self.insert(url, headers, None);
        self
    }

    pub fn body(mut self, url: &str, body: &str) -> Self {
        self.insert(url, HeaderMap::new(), Some(body.to_string()));
        self
    }

    fn insert(&mut self, url: &str, headers: HeaderMap, body: Option<String>) {
        self.responses.insert(
            url.to_string(),
            FetchedResponse {
                url: url.to_string(),
                status_code: 200,
                headers,
                body,
            },
        );
    }
}

impl Transport for StubTransport {
    async fn get(&self, url: &str, _with_body: bool) -> Result<FetchedResponse> {
        tokio::task::yield_now().await;
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| ScanError::Other(format!("connection refused: {}", url)))
    }
}

/// A reachable record missing exactly `missing`, in the order given.
pub fn header_record(url: &str, missing: &[&'static str]) -> HeaderRecord {
    let headers = SECURITY_HEADERS
        .iter()
        .filter(|h| !missing.contains(h))
        .map(|h| (*h, "1".to_string()))
        .collect();

    let mut record = UrlRecord::new(url.to_string());
    record.verdict = Some(SecurityHeaders {
        headers,
        missing_headers: missing.to_vec(),
    });
    record
}

pub fn unreachable_record(url: &str) -> HeaderRecord {
    UrlRecord::with_error(url.to_string(), "connection refused".to_string())
}
