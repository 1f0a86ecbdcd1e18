pub mod group;
pub mod report;
pub mod scan;

pub use group::{MissingHeaderGroup, group_by_missing_headers};
pub use report::{
    generate_header_report, generate_iis_report, render_groups, summarize, unreachable_hosts,
};
pub use scan::{ScanOptions, ScanProgressCallback, execute_scan, scan_lines};
