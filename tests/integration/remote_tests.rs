use super::common::{make_bag, plan, report, write_remote};
use bagdupe::duplicates::{DedupeConfig, DuplicateFinder, FinderError, Origin};
use bagdupe::manifest::ManifestError;

#[test]
fn test_remote_demotes_lone_local_copy() {
    let bag = make_bag("h1 data/a.txt\n");
    let remote_dir = tempfile::tempdir().unwrap();
    let remote = write_remote(&remote_dir, "h1 archive/a.txt\n");

    let output = report(DedupeConfig::new(bag.path()).with_remote_manifest(&remote));

    assert_eq!(output, "delete data/a.txt\n");
}

#[test]
fn test_remote_demotes_every_local_copy() {
    let bag = make_bag("h1 data/a.txt\nh1 data/b.txt\nh2 data/c.txt\n");
    let remote_dir = tempfile::tempdir().unwrap();
    let remote = write_remote(&remote_dir, "h1 archive/a.txt\n");

    let output = report(DedupeConfig::new(bag.path()).with_remote_manifest(&remote));

    assert_eq!(output, "delete data/a.txt\ndelete data/b.txt\n");
}

#[test]
fn test_non_matching_remote_keeps_unique_file() {
    let bag = make_bag("h1 data/a.txt\n");
    let remote_dir = tempfile::tempdir().unwrap();
    let remote = write_remote(&remote_dir, "h9 archive/other.txt\n");

    let result = plan(DedupeConfig::new(bag.path()).with_remote_manifest(&remote));

    assert!(result.plan.is_empty());
    let (_, stats) = result.summary.remote.unwrap();
    assert_eq!(stats.matched, 0);
    assert_eq!(stats.ignored, 1);
    assert_eq!(stats.demoted_unique, 0);
}

#[test]
fn test_combined_local_and_remote_duplicates() {
    let bag = make_bag(
        "h1 data/a.txt\nh1 data/b.txt\nh2 data/c.txt\nh2 data/d.txt\nh3 data/e.txt\n",
    );
    let remote_dir = tempfile::tempdir().unwrap();
    let remote = write_remote(&remote_dir, "h2 archive/c.txt\nh4 archive/z.txt\n");

    let result = plan(DedupeConfig::new(bag.path()).with_remote_manifest(&remote));
    let planned: Vec<&str> = result.plan.paths().collect();

    assert_eq!(planned, vec!["data/b.txt", "data/c.txt", "data/d.txt"]);

    let h2 = result.groups.get("h2").unwrap();
    let canonical = h2.canonical().unwrap();
    assert_eq!(canonical.path, "archive/c.txt");
    assert_eq!(canonical.origin, Origin::Remote);
}

#[test]
fn test_remote_paths_are_never_planned() {
    let bag = make_bag("h1 data/a.txt\n");
    let remote_dir = tempfile::tempdir().unwrap();
    let remote = write_remote(&remote_dir, "h1 archive/one.txt\nh1 archive/two.txt\n");

    let result = plan(DedupeConfig::new(bag.path()).with_remote_manifest(&remote));
    let planned: Vec<&str> = result.plan.paths().collect();

    assert_eq!(planned, vec!["data/a.txt"]);
    assert_eq!(
        result.groups.get("h1").unwrap().canonical().unwrap().path,
        "archive/two.txt"
    );
}

#[test]
fn test_remote_entries_do_not_create_groups() {
    let bag = make_bag("h1 data/a.txt\n");
    let remote_dir = tempfile::tempdir().unwrap();
    let remote = write_remote(&remote_dir, "h7 archive/x.txt\nh8 archive/y.txt\n");

    let result = plan(DedupeConfig::new(bag.path()).with_remote_manifest(&remote));

    assert_eq!(result.groups.len(), 1);
    assert!(result.groups.get("h7").is_none());
}

#[test]
fn test_missing_remote_manifest_is_fatal() {
    let bag = make_bag("h1 data/a.txt\nh1 data/b.txt\n");
    let missing = bag.path().join("no-such-remote.txt");

    let result = DuplicateFinder::new(DedupeConfig::new(bag.path()).with_remote_manifest(&missing))
        .find_duplicates();

    match result {
        Err(FinderError::Manifest(ManifestError::NotFound(path))) => {
            assert!(path.ends_with("no-such-remote.txt"));
        }
        other => panic!("Expected NotFound error, got {:?}", other.map(|r| r.plan)),
    }
}
