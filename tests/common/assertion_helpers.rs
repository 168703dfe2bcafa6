//! Assertion helpers for testing

use std::collections::BTreeSet;
use std::path::Path;

use gitmir::domain::entities::mirror::Mirror;

/// Assert that a file exists
#[macro_export]
macro_rules! assert_file_exists {
    ($path:expr) => {
        assert!($path.exists(), "File should exist: {}", $path.display());
    };
    ($path:expr, $msg:expr) => {
        assert!($path.exists(), "{}: {}", $msg, $path.display());
    };
}

/// Relative mirror paths with `/` separators, for order-independent comparison
pub fn relative_paths(mirrors: &[Mirror]) -> BTreeSet<String> {
    mirrors
        .iter()
        .map(|mirror| mirror.relative_path().to_string_lossy().replace('\\', "/"))
        .collect()
}

pub fn set_of(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Lines of a mirror log file
pub fn log_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read log {}: {}", path.display(), e))
        .lines()
        .map(String::from)
        .collect()
}

/// Assert the log holds `runs` complete runs of `label`, each ending with the given success flag
pub fn assert_log_runs(path: &Path, label: &str, runs: usize) {
    let lines = log_lines(path);
    let prefix = format!("{}: ", label);
    let starts = lines
        .iter()
        .filter(|line| line.starts_with(&prefix) && line.ends_with(" Start"))
        .count();
    let dones = lines
        .iter()
        .filter(|line| line.starts_with(&prefix) && line.contains(" Done, success:"))
        .count();
    assert_eq!(starts, runs, "Start lines in {}", path.display());
    assert_eq!(dones, runs, "Done lines in {}", path.display());
}
