use headsweep_scanner::{
    Classifier, DoneSignal, Fetcher, NUM_FETCHERS, ProgressCallback, Result, ScanError, Transport,
    UrlRecord, WorkerPool, done_signal,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Options for configuring a scan
pub struct ScanOptions {
    pub hosts_file: PathBuf,
    pub workers: usize,
    pub show_progress_bars: bool,
}

impl ScanOptions {
    pub fn new(hosts_file: impl Into<PathBuf>) -> Self {
        Self {
            hosts_file: hosts_file.into(),
            workers: NUM_FETCHERS,
            show_progress_bars: false,
        }
    }
}

/// Callback for reporting scan stages
pub type ScanProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Scan every host listed in `options.hosts_file`.
///
/// Failing to open the file is the only fatal error; hosts that cannot be reached come
/// back as unreachable records. Records are returned in the order they finished.
pub async fn execute_scan<C, T>(
    options: ScanOptions,
    fetcher: Arc<Fetcher<T>>,
    classifier: Arc<C>,
    progress_callback: Option<ScanProgressCallback>,
) -> Result<Vec<UrlRecord<C::Verdict>>>
where
    C: Classifier,
    T: Transport,
{
    info!("Reading {}...", options.hosts_file.display());
    if let Some(ref callback) = progress_callback {
        callback(format!("Reading {}...", options.hosts_file.display()));
    }

    let file = File::open(&options.hosts_file)
        .await
        .map_err(|source| ScanError::HostsFile {
            path: options.hosts_file.clone(),
            source,
        })?;

    scan_lines(
        BufReader::new(file),
        &options,
        fetcher,
        classifier,
        progress_callback,
    )
    .await
}

/// Run the fetch pipeline over any line-oriented source.
pub async fn scan_lines<R, C, T>(
    reader: R,
    options: &ScanOptions,
    fetcher: Arc<Fetcher<T>>,
    classifier: Arc<C>,
    progress_callback: Option<ScanProgressCallback>,
) -> Result<Vec<UrlRecord<C::Verdict>>>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    C: Classifier,
    T: Transport,
{
    // Dropped on every way out of this function, which releases any fetcher still
    // waiting to hand over a record.
    let (_done_guard, done) = done_signal();
    let (urls_tx, urls_rx) = mpsc::channel(1);

    let progress_bar = if options.show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Starting scan...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let dispatched = Arc::new(AtomicUsize::new(0));
    let worker_progress: ProgressCallback = {
        let pb = progress_bar.clone();
        let dispatched = dispatched.clone();
        Arc::new(move |_worker_id: usize, url: String| {
            let count = dispatched.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(ref pb) = pb {
                pb.set_message(format!("Scanning {} ({} hosts dispatched)", url, count));
                pb.tick();
            }
        })
    };

    let mut results = WorkerPool::new(fetcher, classifier)
        .with_workers(options.workers)
        .with_progress_callback(worker_progress)
        .spawn(urls_rx, done.clone());

    let feeder = tokio::spawn(feed_lines(reader, urls_tx, done));

    info!("Waiting for result...");
    if let Some(ref callback) = progress_callback {
        let msg = "Waiting for result...".to_string();
        match progress_bar {
            // Keep the spinner from drawing over the caller's output
            Some(ref pb) => pb.suspend(|| callback(msg)),
            None => callback(msg),
        }
    }

    let mut records = Vec::new();
    while let Some(record) = results.recv().await {
        records.push(record);
    }

    match feeder.await? {
        Ok(fed) => debug!("Fed {} host(s) to the fetchers", fed),
        Err(e) => warn!("Stopped reading hosts early: {}", e),
    }

    let unreachable = records.iter().filter(|r| !r.reachable).count();
    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!(
            "Scan complete! {} hosts scanned, {} unreachable",
            records.len(),
            unreachable
        ));
    }
    info!(
        "Scan complete. {} hosts scanned, {} unreachable",
        records.len(),
        unreachable
    );

    Ok(records)
}

/// Push every non-blank line into the fetcher queue, then close it by returning.
async fn feed_lines<R>(
    reader: R,
    urls: mpsc::Sender<String>,
    mut done: DoneSignal,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut fed = 0;

    while let Some(line) = lines.next_line().await? {
        let host = line.trim();
        if host.is_empty() {
            continue;
        }

        tokio::select! {
            sent = urls.send(host.to_string()) => {
                if sent.is_err() {
                    break;
                }
            }
            _ = done.closed() => break,
        }
        fed += 1;
    }

    Ok(fed)
}
