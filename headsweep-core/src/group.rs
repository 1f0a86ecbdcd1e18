// Grouping of scanned hosts by the security headers they lack

use headsweep_scanner::{HeaderRecord, SecurityHeaders};
use std::collections::HashSet;

/// Hosts that are missing exactly the same set of security headers.
#[derive(Debug)]
pub struct MissingHeaderGroup<'a> {
    /// In order of appearance; the first member is the group's representative.
    pub members: Vec<&'a HeaderRecord>,
    /// The representative's missing headers, in whitelist order.
    pub missing_headers: &'a [&'static str],
}

/// Partition reachable records into groups with identical missing-header sets.
///
/// Groups come out in order of first appearance, and so do the members inside each
/// one. A URL that shows up more than once is only counted the first time. Unreachable
/// records have nothing to compare and are left out.
pub fn group_by_missing_headers(records: &[HeaderRecord]) -> Vec<MissingHeaderGroup<'_>> {
    let scanned: Vec<(&HeaderRecord, &SecurityHeaders)> = records
        .iter()
        .filter(|r| r.reachable)
        .filter_map(|r| r.verdict.as_ref().map(|v| (r, v)))
        .collect();

    let mut grouped: HashSet<&str> = HashSet::new();
    let mut groups = Vec::new();

    for (idx, &(first, first_headers)) in scanned.iter().enumerate() {
        if !grouped.insert(first.url.as_str()) {
            continue;
        }

        let mut members = vec![first];
        for &(other, other_headers) in &scanned[idx + 1..] {
            if other_headers.missing_headers.len() != first_headers.missing_headers.len()
                || grouped.contains(other.url.as_str())
            {
                continue;
            }
            if first_headers.has_same_missing_headers(other_headers) {
                grouped.insert(other.url.as_str());
                members.push(other);
            }
        }

        groups.push(MissingHeaderGroup {
            members,
            missing_headers: &first_headers.missing_headers,
        });
    }

    groups
}
