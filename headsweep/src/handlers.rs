use anyhow::{Context, Result, anyhow, bail};
use clap::ArgMatches;
use colored::Colorize;
use headsweep_core::{
    ScanOptions, ScanProgressCallback, execute_scan, generate_header_report, generate_iis_report,
    summarize, unreachable_hosts,
};
use headsweep_scanner::{Fetcher, IisClassifier, SecurityHeaderClassifier};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// Which classifier a scan runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Headers,
    Iis,
}

impl FromStr for ScanMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "headers" => Ok(ScanMode::Headers),
            "iis" => Ok(ScanMode::Iis),
            other => bail!("Unknown scan mode '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanArgs {
    pub hosts_file: PathBuf,
    pub mode: ScanMode,
    pub quiet: bool,
    pub log_file: PathBuf,
}

impl ScanArgs {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let hosts_file = matches
            .get_one::<PathBuf>("HOSTS_FILE")
            .cloned()
            .ok_or_else(|| anyhow!("No hosts file given"))?;
        let mode = matches
            .get_one::<String>("mode")
            .map(|m| m.parse::<ScanMode>())
            .transpose()?
            .unwrap_or(ScanMode::Headers);
        let log_file = matches
            .get_one::<PathBuf>("log-file")
            .cloned()
            .unwrap_or_else(|| PathBuf::from("debug.log"));

        Ok(Self {
            hosts_file,
            mode,
            quiet: matches.get_flag("quiet"),
            log_file,
        })
    }
}

pub fn print_status(quiet: bool, msg: &str) {
    if !quiet {
        eprintln!("{} {}", "→".blue(), msg.bright_white());
    }
}

fn status_callback(quiet: bool) -> Option<ScanProgressCallback> {
    if quiet {
        return None;
    }
    Some(Arc::new(|msg: String| print_status(false, &msg)))
}

/// Scan every host in `hosts_file` and render the report for `mode`.
pub async fn run_scan(mode: ScanMode, hosts_file: &Path, quiet: bool) -> Result<String> {
    let fetcher = Arc::new(Fetcher::http().context("Failed to build HTTP client")?);
    let mut options = ScanOptions::new(hosts_file);
    options.show_progress_bars = !quiet;

    let (report, summary, unreachable) = match mode {
        ScanMode::Headers => {
            let records = execute_scan(
                options,
                fetcher,
                Arc::new(SecurityHeaderClassifier),
                status_callback(quiet),
            )
            .await
            .context("Header scan failed")?;

            info!("Grouping...");
            print_status(quiet, "Grouping...");
            (
                generate_header_report(&records),
                summarize(&records),
                unreachable_hosts(&records),
            )
        }
        ScanMode::Iis => {
            let records = execute_scan(
                options,
                fetcher,
                Arc::new(IisClassifier),
                status_callback(quiet),
            )
            .await
            .context("IIS scan failed")?;

            (
                generate_iis_report(&records),
                summarize(&records),
                unreachable_hosts(&records),
            )
        }
    };

    info!("{}", summary);
    if !quiet {
        for host in &unreachable {
            eprintln!("{} {}", "✗".red().bold(), host);
        }
        eprintln!("{} {}", "✓".green().bold(), summary);
    }

    Ok(report)
}
