// Per-response classification rules

use crate::transport::FetchedResponse;
use regex::Regex;
use reqwest::header::HeaderMap;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

/// Security headers every host is checked for, in reporting order.
pub const SECURITY_HEADERS: [&str; 5] = [
    "Content-Security-Policy",
    "X-Content-Type-Options",
    "Strict-Transport-Security",
    "X-Frame-Options",
    "X-XSS-Protection",
];

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("<title>(.*)</title>").expect("title pattern is valid"));

/// Decides what a fetcher keeps from a successful response.
pub trait Classifier: Send + Sync + 'static {
    type Verdict: Send + 'static;

    /// Ask the transport to download the response body as well.
    fn needs_body(&self) -> bool {
        false
    }

    fn classify(&self, response: &FetchedResponse) -> Self::Verdict;
}

/// Which whitelisted security headers a host sent, and which it left out.
///
/// Every entry of [`SECURITY_HEADERS`] lands in exactly one of the two fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityHeaders {
    pub headers: HashMap<&'static str, String>,
    pub missing_headers: Vec<&'static str>,
}

impl SecurityHeaders {
    pub fn from_headers(response_headers: &HeaderMap) -> Self {
        let mut headers = HashMap::new();

        for name in SECURITY_HEADERS {
            let values: Vec<String> = response_headers
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect();

            if !values.is_empty() {
                headers.insert(name, values.join(" "));
            }
        }

        let missing_headers = SECURITY_HEADERS
            .into_iter()
            .filter(|name| !headers.contains_key(*name))
            .collect();

        Self {
            headers,
            missing_headers,
        }
    }

    /// Set comparison of the missing headers, ignoring order.
    pub fn has_same_missing_headers(&self, other: &SecurityHeaders) -> bool {
        self.missing_headers.len() == other.missing_headers.len()
            && self
                .missing_headers
                .iter()
                .all(|h| other.missing_headers.contains(h))
            && other
                .missing_headers
                .iter()
                .all(|h| self.missing_headers.contains(h))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityHeaderClassifier;

impl Classifier for SecurityHeaderClassifier {
    type Verdict = SecurityHeaders;

    fn classify(&self, response: &FetchedResponse) -> SecurityHeaders {
        let verdict = SecurityHeaders::from_headers(&response.headers);
        debug!(
            "{} is missing {} security header(s)",
            response.url,
            verdict.missing_headers.len()
        );
        verdict
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IisVerdict {
    Iis { version: &'static str },
    /// Anything without a known IIS default title, kept for manual review.
    NotIis { url: String, title: Option<String> },
}

impl IisVerdict {
    pub fn from_title(url: &str, title: Option<&str>) -> Self {
        let version = match title {
            Some("IIS7") => Some("7"),
            Some("Microsoft Internet Information Services 8") => Some("8"),
            Some("IIS Windows Server") => Some("8.5"),
            _ => None,
        };

        match version {
            Some(version) => IisVerdict::Iis { version },
            None => IisVerdict::NotIis {
                url: url.to_string(),
                title: title.map(String::from),
            },
        }
    }
}

/// Fingerprints IIS by the default welcome page title.
#[derive(Debug, Clone, Copy, Default)]
pub struct IisClassifier;

pub fn extract_title(body: &str) -> Option<&str> {
    TITLE_RE
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

impl Classifier for IisClassifier {
    type Verdict = IisVerdict;

    fn needs_body(&self) -> bool {
        true
    }

    fn classify(&self, response: &FetchedResponse) -> IisVerdict {
        let title = response.body.as_deref().and_then(extract_title);
        let verdict = IisVerdict::from_title(&response.url, title);
        debug!("{} classified as {:?}", response.url, verdict);
        verdict
    }
}
