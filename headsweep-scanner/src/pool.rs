use crate::classifier::Classifier;
use crate::fetcher::Fetcher;
use crate::record::UrlRecord;
use crate::transport::Transport;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Number of fetchers a scan runs with.
pub const NUM_FETCHERS: usize = 4;

pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// Host lines shared by every fetcher; whoever holds the lock takes the next line.
type SharedUrls = Arc<Mutex<mpsc::Receiver<String>>>;

/// Create a done-signal pair.
///
/// The signal fires once, when the [`DoneGuard`] is dropped, and every clone of the
/// [`DoneSignal`] observes it.
pub fn done_signal() -> (DoneGuard, DoneSignal) {
    let (tx, rx) = watch::channel(());
    (DoneGuard(tx), DoneSignal(rx))
}

#[derive(Debug)]
pub struct DoneGuard(watch::Sender<()>);

#[cfg(test)]
impl DoneGuard {
    pub fn close(self) {}
}

#[derive(Debug, Clone)]
pub struct DoneSignal(watch::Receiver<()>);

impl DoneSignal {
    /// Resolves once the guard is gone.
    pub async fn closed(&mut self) {
        while self.0.changed().await.is_ok() {}
    }

    pub fn is_closed(&self) -> bool {
        self.0.has_changed().is_err()
    }
}

pub struct WorkerPool<C, T> {
    fetcher: Arc<Fetcher<T>>,
    classifier: Arc<C>,
    workers: usize,
    progress_callback: Option<ProgressCallback>,
}

impl<C: Classifier, T: Transport> WorkerPool<C, T> {
    pub fn new(fetcher: Arc<Fetcher<T>>, classifier: Arc<C>) -> Self {
        Self {
            fetcher,
            classifier,
            workers: NUM_FETCHERS,
            progress_callback: None,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Start the fetchers and hand back the stream of finished records.
    ///
    /// Every fetcher pulls from `urls` until it is closed. The returned receiver yields
    /// `None` only after all fetchers have exited. Closing `done` makes every fetcher stop
    /// at its next pull or delivery, whichever comes first.
    pub fn spawn(
        self,
        urls: mpsc::Receiver<String>,
        done: DoneSignal,
    ) -> mpsc::Receiver<UrlRecord<C::Verdict>> {
        let (results_tx, results_rx) = mpsc::channel(1);
        let urls: SharedUrls = Arc::new(Mutex::new(urls));

        let mut fetchers = JoinSet::new();
        for worker_id in 0..self.workers {
            fetchers.spawn(run_fetcher(
                worker_id,
                self.fetcher.clone(),
                self.classifier.clone(),
                urls.clone(),
                results_tx.clone(),
                done.clone(),
                self.progress_callback.clone(),
            ));
        }
        debug!("Started {} fetchers", self.workers);

        // The barrier owns the last sender, so the channel closes only after every
        // fetcher has been joined.
        tokio::spawn(async move {
            while let Some(joined) = fetchers.join_next().await {
                if let Err(e) = joined {
                    warn!("Fetcher task failed: {}", e);
                }
            }
            debug!("All fetchers finished, closing result channel");
            drop(results_tx);
        });

        results_rx
    }
}

async fn run_fetcher<C: Classifier, T: Transport>(
    worker_id: usize,
    fetcher: Arc<Fetcher<T>>,
    classifier: Arc<C>,
    urls: SharedUrls,
    results: mpsc::Sender<UrlRecord<C::Verdict>>,
    mut done: DoneSignal,
    progress_callback: Option<ProgressCallback>,
) {
    debug!("Fetcher {} started", worker_id);

    loop {
        let next = {
            let mut urls = urls.lock().await;
            tokio::select! {
                biased;
                _ = done.closed() => None,
                next = urls.recv() => next,
            }
        };
        let Some(line) = next else {
            break;
        };

        info!("Scanning {}", line);
        if let Some(ref callback) = progress_callback {
            callback(worker_id, line.clone());
        }

        let record = fetcher.fetch(&line, classifier.as_ref()).await;

        // Once done has fired a record is never delivered, even if the slot frees up
        tokio::select! {
            biased;
            _ = done.closed() => {
                debug!("Fetcher {}: cancelled while delivering {}", worker_id, line);
                break;
            }
            sent = results.send(record) => {
                if sent.is_err() {
                    debug!("Fetcher {}: result channel dropped", worker_id);
                    break;
                }
            }
        }
    }

    debug!("Fetcher {} finished", worker_id);
}
