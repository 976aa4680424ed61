use super::common::{make_bag, plan, report, write_remote};
use bagdupe::duplicates::{DedupeConfig, DuplicateFinder, FinderError};
use bagdupe::manifest::{MalformedLinePolicy, ManifestError};

const MANIFEST_WITH_JUNK: &str = "h1 data/a.txt\nlonelytoken\n\nh1 data/b.txt\n";

#[test]
fn test_skip_policy_ignores_malformed_lines() {
    let bag = make_bag(MANIFEST_WITH_JUNK);

    let result = plan(DedupeConfig::new(bag.path()));

    assert_eq!(result.summary.manifest_entries, 2);
    assert_eq!(result.summary.malformed_lines, 1);
    assert_eq!(result.plan.paths().collect::<Vec<_>>(), vec!["data/b.txt"]);
}

#[test]
fn test_fail_policy_aborts_with_line_number() {
    let bag = make_bag(MANIFEST_WITH_JUNK);

    let result = DuplicateFinder::new(
        DedupeConfig::new(bag.path()).with_malformed_lines(MalformedLinePolicy::Fail),
    )
    .find_duplicates();

    match result {
        Err(FinderError::Manifest(ManifestError::Malformed { line, content })) => {
            assert_eq!(line, 2);
            assert_eq!(content, "lonelytoken");
        }
        other => panic!("Expected Malformed error, got {:?}", other.map(|r| r.plan)),
    }
}

#[test]
fn test_fail_policy_applies_to_remote_manifest() {
    let bag = make_bag("h1 data/a.txt\n");
    let remote_dir = tempfile::tempdir().unwrap();
    let remote = write_remote(&remote_dir, "h1 archive/a.txt\nbroken\n");

    let result = DuplicateFinder::new(
        DedupeConfig::new(bag.path())
            .with_remote_manifest(&remote)
            .with_malformed_lines(MalformedLinePolicy::Fail),
    )
    .find_duplicates();

    assert!(matches!(
        result,
        Err(FinderError::Manifest(ManifestError::Malformed { line: 2, .. }))
    ));
}

#[test]
fn test_blank_and_whitespace_lines_are_not_malformed() {
    let bag = make_bag("h1 data/a.txt\n   \n\t\nh1 data/b.txt\n");

    let result = plan(DedupeConfig::new(bag.path()).with_malformed_lines(MalformedLinePolicy::Fail));

    assert_eq!(result.summary.malformed_lines, 0);
    assert_eq!(result.plan.len(), 1);
}

#[test]
fn test_paths_with_spaces_are_kept_whole() {
    let bag = make_bag("h1 data/my file.txt\nh1 data/my copy.txt\n");

    let output = report(DedupeConfig::new(bag.path()));

    assert_eq!(output, "delete data/my copy.txt\n");
}

#[test]
fn test_empty_manifest_plans_nothing() {
    let bag = make_bag("");

    let result = plan(DedupeConfig::new(bag.path()));

    assert!(result.groups.is_empty());
    assert!(result.plan.is_empty());
}
