use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to open hosts file {}: {source}", .path.display())]
    HostsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),

    #[error("Other error: {0}")]
    Other(String),
}

impl ScanError {
    /// Whether a failed request is worth repeating over `https://`.
    ///
    /// Anything that went wrong on the wire qualifies. A URL that never parsed, or a
    /// request reqwest refused to build, fails the same way under either scheme.
    pub fn is_network(&self) -> bool {
        match self {
            ScanError::HttpError(e) => !e.is_builder(),
            ScanError::InvalidUrl(_) => false,
            _ => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "invalid UTF-8");
        let err: ScanError = io.into();

        assert!(matches!(err, ScanError::IoError(_)));
        assert!(err.to_string().starts_with("IO error: "));
    }
}
