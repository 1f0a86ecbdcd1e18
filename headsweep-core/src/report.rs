// Console reports for finished scans

use crate::group::{MissingHeaderGroup, group_by_missing_headers};
use headsweep_scanner::{HeaderRecord, IisRecord, UrlRecord};

/// Header-scan report: one block per missing-header group.
///
/// ```text
/// [http://a.example]()
/// [http://b.example]()
///  * X-Frame-Options
///
/// ```
pub fn generate_header_report(records: &[HeaderRecord]) -> String {
    render_groups(&group_by_missing_headers(records))
}

pub fn render_groups(groups: &[MissingHeaderGroup<'_>]) -> String {
    let mut report = String::new();

    for group in groups {
        for member in &group.members {
            report.push_str(&format!("[{}]()\n", member.url));
        }
        for header in group.missing_headers {
            report.push_str(&format!(" * {}\n", header));
        }
        report.push('\n');
    }

    report
}

/// IIS fingerprint report with `IIS`, `Non IIS` and `Unreachable` sections.
///
/// `Non IIS` only holds hosts that answered; a host that never did is listed under
/// `Unreachable` alone.
pub fn generate_iis_report(records: &[IisRecord]) -> String {
    let mut report = String::new();

    report.push_str("IIS\n");
    for record in records.iter().filter(|r| r.is_iis()) {
        report.push_str(&format!("{}\n", record.url));
    }

    report.push_str("Non IIS\n");
    for record in records.iter().filter(|r| r.reachable && !r.is_iis()) {
        report.push_str(&format!("{}\n", record.url));
    }

    report.push_str("Unreachable\n");
    for record in records.iter().filter(|r| !r.reachable) {
        report.push_str(&format!("{}\n", record.url));
    }

    report
}

/// One-line tally for status output.
pub fn summarize<V>(records: &[UrlRecord<V>]) -> String {
    let unreachable = records.iter().filter(|r| !r.reachable).count();
    format!(
        "{} hosts scanned, {} reachable, {} unreachable",
        records.len(),
        records.len() - unreachable,
        unreachable
    )
}

/// `url: error` for every host that could not be reached, in record order.
pub fn unreachable_hosts<V>(records: &[UrlRecord<V>]) -> Vec<String> {
    records
        .iter()
        .filter(|r| !r.reachable)
        .map(|r| match r.error {
            Some(ref error) => format!("{}: {}", r.url, error),
            None => r.url.clone(),
        })
        .collect()
}
