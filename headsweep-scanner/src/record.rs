use crate::classifier::{IisVerdict, SecurityHeaders};

/// Outcome of scanning one input line.
///
/// `url` is the address that was actually requested last, so a host that only answered
/// over HTTPS shows up with its upgraded scheme. `verdict` is filled in by the classifier
/// and stays `None` for hosts that never answered.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlRecord<V> {
    pub url: String,
    pub reachable: bool,
    pub verdict: Option<V>,
    pub error: Option<String>,
}

pub type HeaderRecord = UrlRecord<SecurityHeaders>;
pub type IisRecord = UrlRecord<IisVerdict>;

impl<V> UrlRecord<V> {
    pub fn new(url: String) -> Self {
        Self {
            url,
            reachable: true,
            verdict: None,
            error: None,
        }
    }

    pub fn with_error(url: String, error: String) -> Self {
        Self {
            url,
            reachable: false,
            verdict: None,
            error: Some(error),
        }
    }
}

impl HeaderRecord {
    /// Missing whitelist headers, empty for unreachable hosts.
    pub fn missing_headers(&self) -> &[&'static str] {
        self.verdict
            .as_ref()
            .map(|v| v.missing_headers.as_slice())
            .unwrap_or(&[])
    }
}

impl IisRecord {
    pub fn is_iis(&self) -> bool {
        matches!(self.verdict, Some(IisVerdict::Iis { .. }))
    }
}
