// Tests for missing-header grouping

mod common;

use common::{header_record, unreachable_record};
use headsweep_core::group::group_by_missing_headers;
use headsweep_scanner::{HeaderRecord, SECURITY_HEADERS};
use std::collections::{BTreeSet, HashSet};

const CSP: &str = "Content-Security-Policy";
const XCTO: &str = "X-Content-Type-Options";
const HSTS: &str = "Strict-Transport-Security";
const XFO: &str = "X-Frame-Options";
const XXP: &str = "X-XSS-Protection";

fn urls(members: &[&HeaderRecord]) -> Vec<String> {
    members.iter().map(|r| r.url.clone()).collect()
}

fn missing_set(record: &HeaderRecord) -> BTreeSet<&'static str> {
    record.missing_headers().iter().copied().collect()
}

// ============================================================================
// Basic grouping
// ============================================================================

#[test]
fn test_group_scenario_from_three_hosts() {
    let records = vec![
        header_record("http://a.example", &[XFO]),
        header_record("http://b.example", &[XFO]),
        header_record("http://c.example", &[]),
    ];

    let groups = group_by_missing_headers(&records);

    assert_eq!(groups.len(), 2);
    assert_eq!(
        urls(&groups[0].members),
        vec!["http://a.example", "http://b.example"]
    );
    assert_eq!(groups[0].missing_headers, &[XFO]);
    assert_eq!(urls(&groups[1].members), vec!["http://c.example"]);
    assert!(groups[1].missing_headers.is_empty());
}

#[test]
fn test_group_empty_input() {
    assert!(group_by_missing_headers(&[]).is_empty());
}

#[test]
fn test_group_order_follows_first_appearance() {
    let records = vec![
        header_record("http://1.example", &[CSP]),
        header_record("http://2.example", &[HSTS]),
        header_record("http://3.example", &[CSP]),
        header_record("http://4.example", &[HSTS]),
        header_record("http://5.example", &[CSP, HSTS]),
    ];

    let groups = group_by_missing_headers(&records);

    assert_eq!(groups.len(), 3);
    assert_eq!(urls(&groups[0].members), vec!["http://1.example", "http://3.example"]);
    assert_eq!(urls(&groups[1].members), vec!["http://2.example", "http://4.example"]);
    assert_eq!(urls(&groups[2].members), vec!["http://5.example"]);
}

// ============================================================================
// Set equality
// ============================================================================

#[test]
fn test_group_ignores_missing_header_order() {
    let records = vec![
        header_record("http://first.example", &[CSP, XFO]),
        header_record("http://second.example", &[XFO, CSP]),
    ];

    let groups = group_by_missing_headers(&records);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members.len(), 2);
    // The representative's list is the one rendered
    assert_eq!(groups[0].missing_headers, &[CSP, XFO]);
}

#[test]
fn test_group_same_count_different_headers() {
    let records = vec![
        header_record("http://a.example", &[CSP, XCTO]),
        header_record("http://b.example", &[CSP, XXP]),
    ];

    let groups = group_by_missing_headers(&records);

    assert_eq!(groups.len(), 2);
}

#[test]
fn test_group_subset_is_not_a_match() {
    let records = vec![
        header_record("http://a.example", &[CSP]),
        header_record("http://b.example", &[CSP, XFO]),
        header_record("http://c.example", &SECURITY_HEADERS),
    ];

    let groups = group_by_missing_headers(&records);

    assert_eq!(groups.len(), 3);
    for group in &groups {
        assert_eq!(group.members.len(), 1);
    }
}

// ============================================================================
// Partition properties
// ============================================================================

#[test]
fn test_group_is_an_equivalence_partition() {
    // Walk every subset of the whitelist, several times over, in a scrambled order
    let mut records = Vec::new();
    for i in 0..96usize {
        let mask = (i * 7) % 32;
        let missing: Vec<&'static str> = SECURITY_HEADERS
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, h)| *h)
            .collect();
        records.push(header_record(&format!("http://host{}.example", i), &missing));
    }

    let groups = group_by_missing_headers(&records);

    // Disjoint and covering
    let mut seen = HashSet::new();
    for group in &groups {
        for member in &group.members {
            assert!(seen.insert(member.url.clone()), "{} grouped twice", member.url);
        }
    }
    assert_eq!(seen.len(), records.len());

    // Identical sets inside a group
    for group in &groups {
        let expected = missing_set(group.members[0]);
        for member in &group.members {
            assert_eq!(missing_set(member), expected);
        }
    }

    // Distinct sets across groups
    let keys: HashSet<BTreeSet<&'static str>> =
        groups.iter().map(|g| missing_set(g.members[0])).collect();
    assert_eq!(keys.len(), groups.len());
    assert_eq!(groups.len(), 32);
}

#[test]
fn test_group_skips_unreachable_hosts() {
    let records = vec![
        header_record("http://up.example", &[XFO]),
        unreachable_record("https://down.example"),
        header_record("http://other.example", &[XFO]),
    ];

    let groups = group_by_missing_headers(&records);

    assert_eq!(groups.len(), 1);
    assert_eq!(
        urls(&groups[0].members),
        vec!["http://up.example", "http://other.example"]
    );
}

#[test]
fn test_group_only_unreachable_hosts() {
    let records = vec![
        unreachable_record("https://a.example"),
        unreachable_record("https://b.example"),
    ];

    assert!(group_by_missing_headers(&records).is_empty());
}

#[test]
fn test_group_repeated_url_is_counted_once() {
    let records = vec![
        header_record("http://dup.example", &[XFO]),
        header_record("http://dup.example", &[CSP]),
        header_record("http://dup.example", &[XFO]),
    ];

    let groups = group_by_missing_headers(&records);

    assert_eq!(groups.len(), 1);
    assert_eq!(urls(&groups[0].members), vec!["http://dup.example"]);
    assert_eq!(groups[0].missing_headers, &[XFO]);
}
