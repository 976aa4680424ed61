use super::common::{make_bag, plan, write_remote};
use bagdupe::actions::{execute_plan, DeleteError, DeleteMethod, NoProgress};
use bagdupe::duplicates::{DedupeConfig, DuplicateFinder, ExecutionMode, FinderError};
use bagdupe::manifest::{MalformedLinePolicy, ManifestError};
use std::fs;

#[test]
fn test_delete_mode_keeps_canonical_copy() {
    let bag = make_bag("h1 data/a.txt\nh1 data/c.txt\nh1 data/d.txt\nh2 data/e.txt\n");
    let result = plan(DedupeConfig::new(bag.path()).with_mode(ExecutionMode::Delete));

    let batch =
        execute_plan(&result.plan, DeleteMethod::Permanent, None::<&NoProgress>).unwrap();

    assert_eq!(batch.success_count(), 2);
    assert!(bag.path().join("data/a.txt").exists());
    assert!(!bag.path().join("data/c.txt").exists());
    assert!(!bag.path().join("data/d.txt").exists());
    assert!(bag.path().join("data/e.txt").exists());
    assert!(bag.path().join("manifest-md5.txt").exists());
}

#[test]
fn test_delete_mode_with_remote_removes_lone_copy() {
    let bag = make_bag("h1 data/a.txt\nh2 data/b.txt\n");
    let remote_dir = tempfile::tempdir().unwrap();
    let remote = write_remote(&remote_dir, "h1 archive/a.txt\n");
    let result = plan(DedupeConfig::new(bag.path()).with_remote_manifest(&remote));

    execute_plan(&result.plan, DeleteMethod::Permanent, None::<&NoProgress>).unwrap();

    assert!(!bag.path().join("data/a.txt").exists());
    assert!(bag.path().join("data/b.txt").exists());
    assert!(remote.exists());
}

#[test]
fn test_second_run_finds_missing_files() {
    let bag = make_bag("h1 data/a.txt\nh1 data/b.txt\n");
    let config = DedupeConfig::new(bag.path()).with_mode(ExecutionMode::Delete);

    let first = plan(config.clone());
    execute_plan(&first.plan, DeleteMethod::Permanent, None::<&NoProgress>).unwrap();

    // The manifest still lists the removed file.
    let second = plan(config);
    let err =
        execute_plan(&second.plan, DeleteMethod::Permanent, None::<&NoProgress>).unwrap_err();
    assert!(matches!(err, DeleteError::NotFound(_)));
}

#[test]
fn test_missing_file_fails_fast_and_names_path() {
    let bag = make_bag("h1 data/a.txt\nh1 data/c.txt\nh1 data/d.txt\n");
    fs::remove_file(bag.path().join("data/c.txt")).unwrap();
    let result = plan(DedupeConfig::new(bag.path()).with_mode(ExecutionMode::Delete));

    let err =
        execute_plan(&result.plan, DeleteMethod::Permanent, None::<&NoProgress>).unwrap_err();

    match &err {
        DeleteError::NotFound(path) => assert!(path.ends_with("data/c.txt")),
        other => panic!("Expected NotFound, got {:?}", other),
    }
    assert!(err.to_string().contains("c.txt"));
    // Later deletions are not attempted.
    assert!(bag.path().join("data/d.txt").exists());
    assert!(bag.path().join("data/a.txt").exists());
}

#[test]
fn test_earlier_deletions_are_not_rolled_back() {
    let bag = make_bag("h1 data/a.txt\nh1 data/b.txt\nh1 data/c.txt\n");
    fs::remove_file(bag.path().join("data/c.txt")).unwrap();
    let result = plan(DedupeConfig::new(bag.path()).with_mode(ExecutionMode::Delete));

    assert!(execute_plan(&result.plan, DeleteMethod::Permanent, None::<&NoProgress>).is_err());

    assert!(!bag.path().join("data/b.txt").exists());
    assert!(bag.path().join("data/a.txt").exists());
}

#[test]
fn test_manifest_paths_outside_bag_are_never_deleted() {
    let outer = tempfile::tempdir().unwrap();
    let bag = outer.path().join("bag");
    fs::create_dir_all(bag.join("data")).unwrap();
    fs::write(bag.join("data/a.txt"), "a").unwrap();
    let victim = outer.path().join("victim.txt");
    let sibling = outer.path().join("sibling.txt");
    fs::write(&victim, "outside").unwrap();
    fs::write(&sibling, "outside").unwrap();
    fs::write(
        bag.join("manifest-md5.txt"),
        format!("h data/a.txt\nh {}\nh ../sibling.txt\n", victim.display()),
    )
    .unwrap();

    let result = plan(DedupeConfig::new(&bag).with_mode(ExecutionMode::Delete));
    assert_eq!(result.summary.malformed_lines, 2);
    assert!(result.plan.is_empty());

    let batch =
        execute_plan(&result.plan, DeleteMethod::Permanent, None::<&NoProgress>).unwrap();

    assert_eq!(batch.success_count(), 0);
    assert!(victim.exists());
    assert!(sibling.exists());
    assert!(bag.join("data/a.txt").exists());
}

#[test]
fn test_strict_policy_rejects_paths_outside_bag() {
    let bag = make_bag("h data/a.txt\n");
    fs::write(
        bag.path().join("manifest-md5.txt"),
        "h data/a.txt\nh ../sibling.txt\n",
    )
    .unwrap();

    let result = DuplicateFinder::new(
        DedupeConfig::new(bag.path()).with_malformed_lines(MalformedLinePolicy::Fail),
    )
    .find_duplicates();

    assert!(matches!(
        result,
        Err(FinderError::Manifest(ManifestError::Malformed { line: 2, .. }))
    ));
}
