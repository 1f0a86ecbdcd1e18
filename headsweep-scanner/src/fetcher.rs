use crate::classifier::Classifier;
use crate::error::Result;
use crate::normalize::{normalize_url, upgrade_scheme};
use crate::record::UrlRecord;
use crate::transport::{FetchedResponse, HttpTransport, Transport};
use tracing::{debug, warn};

/// Turns one host line into one record.
pub struct Fetcher<T = HttpTransport> {
    transport: T,
}

impl Fetcher<HttpTransport> {
    pub fn http() -> Result<Self> {
        Ok(Self::new(HttpTransport::new()?))
    }
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch and classify a single host.
    ///
    /// Never fails: a host that cannot be reached comes back as an unreachable record,
    /// and the caller moves on to the next line.
    pub async fn fetch<C: Classifier>(&self, line: &str, classifier: &C) -> UrlRecord<C::Verdict> {
        let mut record = UrlRecord::new(normalize_url(line));
        let with_body = classifier.needs_body();

        let response = match self.get_with_fallback(&mut record.url, with_body).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Website unreachable: {} ({})", record.url, e);
                return UrlRecord::with_error(record.url, e.to_string());
            }
        };

        debug!("{} answered with status {}", record.url, response.status_code);
        record.verdict = Some(classifier.classify(&response));
        record
    }

    /// GET `url`, retrying once over HTTPS when a plain HTTP attempt fails on the wire.
    ///
    /// `url` is rewritten before the retry so it always names the last address tried.
    async fn get_with_fallback(
        &self,
        url: &mut String,
        with_body: bool,
    ) -> Result<FetchedResponse> {
        let err = match self.transport.get(url.as_str(), with_body).await {
            Ok(response) => return Ok(response),
            Err(e) => e,
        };

        match upgrade_scheme(url.as_str()) {
            Some(upgraded) if err.is_network() => {
                debug!("{} failed ({}), retrying as {}", url, err, upgraded);
                *url = upgraded;
                self.transport.get(url.as_str(), with_body).await
            }
            _ => Err(err),
        }
    }
}
