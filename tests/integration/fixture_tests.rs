use super::common::{fixture, plan, report};
use bagdupe::duplicates::DedupeConfig;
use bagdupe::manifest::HashAlgorithm;

#[test]
fn test_dup_bag_report() {
    let output = report(DedupeConfig::new(fixture("dup-bag")));
    assert_eq!(output, "delete data/c.txt\ndelete data/d.txt\n");
}

#[test]
fn test_good_bag_report_is_empty() {
    let output = report(DedupeConfig::new(fixture("good-bag")));
    assert!(output.is_empty());
}

#[test]
fn test_report_is_idempotent() {
    let first = report(DedupeConfig::new(fixture("dup-bag")));
    let second = report(DedupeConfig::new(fixture("dup-bag")));
    assert_eq!(first, second);
}

#[test]
fn test_report_does_not_touch_files() {
    report(DedupeConfig::new(fixture("dup-bag")));
    for name in ["a.txt", "c.txt", "d.txt"] {
        assert!(fixture("dup-bag").join("data").join(name).exists());
    }
}

#[test]
fn test_dup_bag_summary() {
    let result = plan(DedupeConfig::new(fixture("dup-bag")));

    assert_eq!(result.bag.algorithm(), HashAlgorithm::Md5);
    assert_eq!(result.summary.manifest_entries, 3);
    assert_eq!(result.summary.hash_groups, 1);
    assert_eq!(result.summary.duplicate_groups, 1);
    assert_eq!(result.summary.duplicate_files, 2);
    assert!(result.summary.remote.is_none());
}

#[test]
fn test_good_bag_has_no_duplicate_groups() {
    let result = plan(DedupeConfig::new(fixture("good-bag")));

    assert_eq!(result.summary.manifest_entries, 2);
    assert_eq!(result.summary.hash_groups, 2);
    assert_eq!(result.groups.with_duplicates().count(), 0);
    assert!(result.plan.is_empty());
}
