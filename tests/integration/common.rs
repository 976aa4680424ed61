use bagdupe::duplicates::{DedupeConfig, DuplicateFinder, FinderResult};
use bagdupe::output::text::write_report;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Bag with a `manifest-md5.txt` and every listed payload file created.
pub fn make_bag(manifest: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("manifest-md5.txt"), manifest).unwrap();
    for line in manifest.lines() {
        if let Some((_, path)) = line.trim().split_once(char::is_whitespace) {
            let target = dir.path().join(path.trim());
            fs::create_dir_all(target.parent().unwrap()).unwrap();
            fs::write(&target, line).unwrap();
        }
    }
    dir
}

/// Write a remote manifest next to (not inside) the bag.
pub fn write_remote(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("remote-manifest-md5.txt");
    fs::write(&path, contents).unwrap();
    path
}

pub fn plan(config: DedupeConfig) -> FinderResult {
    DuplicateFinder::new(config).find_duplicates().unwrap()
}

pub fn report(config: DedupeConfig) -> String {
    let result = plan(config);
    let mut out = Vec::new();
    write_report(&result.plan, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}
