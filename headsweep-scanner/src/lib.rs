pub mod classifier;
pub mod error;
pub mod fetcher;
pub mod normalize;
pub mod pool;
pub mod record;
pub mod transport;

pub use classifier::{
    Classifier, IisClassifier, IisVerdict, SECURITY_HEADERS, SecurityHeaderClassifier,
    SecurityHeaders,
};
pub use error::{Result, ScanError};
pub use fetcher::Fetcher;
pub use pool::{DoneGuard, DoneSignal, NUM_FETCHERS, ProgressCallback, WorkerPool, done_signal};
pub use record::{HeaderRecord, IisRecord, UrlRecord};
pub use transport::{FetchedResponse, HttpTransport, Transport, TransportConfig};
