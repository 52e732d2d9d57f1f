//! Integration tests for the dirsnap library.
//!
//! These tests exercise the full pipeline — path handles, tree rendering,
//! search and report aggregation — against real temporary directories.

use dirsnap::{PathHandle, ReportAggregator, ReportConfig, SearchEngine, SearchFilter, TreeRenderer};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tracing_test::traced_test;

/// Contains the test infrastructure.
mod helpers {
    use super::*;

    /// `TestHarness` sets up an isolated directory fixture for each test case.
    pub struct TestHarness {
        pub root_path: PathBuf,
        _temp_dir: TempDir,
    }

    impl TestHarness {
        pub fn new() -> Self {
            let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
            let root_path = temp_dir.path().to_path_buf();
            Self {
                root_path,
                _temp_dir: temp_dir,
            }
        }

        /// Creates a file inside the temporary test directory.
        pub fn create_file(&self, path: &str, content: &str) {
            let file_path = self.root_path.join(path);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).expect("Failed to create parent dir");
            }
            fs::write(file_path, content).expect("Failed to write file");
        }

        /// Sets up the standard three-file project used by several tests.
        pub fn setup_basic_project(&self) {
            self.create_file("a.txt", "a");
            self.create_file("b.log", "b");
            self.create_file("sub/c.txt", "c");
        }

        pub fn root(&self) -> PathHandle {
            PathHandle::new(&self.root_path)
        }

        /// A destination outside the scanned root, so reports never pollute
        /// their own candidate set.
        pub fn destination(&self) -> (PathHandle, TempDir) {
            let out_dir = tempfile::tempdir().expect("Failed to create temp dir");
            let handle = PathHandle::new(out_dir.path().join("report.txt"));
            (handle, out_dir)
        }
    }
}

fn txt_filter() -> SearchFilter {
    SearchFilter {
        suffix: Some(".txt".to_string()),
        only_files: true,
        ..Default::default()
    }
}

#[test]
fn test_tree_and_search_on_basic_project() {
    let harness = helpers::TestHarness::new();
    harness.setup_basic_project();
    let root = harness.root();

    let tree = TreeRenderer::render(&root, true, true, &HashSet::new());
    let lines: Vec<&str> = tree.lines().collect();
    assert_eq!(lines[0], root.name());
    assert!(lines.iter().any(|l| l.ends_with("a.txt")));
    assert!(lines.iter().any(|l| l.ends_with("b.log")));
    assert!(lines.iter().any(|l| l.ends_with("sub")));
    // c.txt is nested one level deeper than sub.
    let sub_line = lines.iter().copied().find(|l| l.ends_with("sub")).unwrap();
    let c_line = lines.iter().copied().find(|l| l.ends_with("c.txt")).unwrap();
    let indent = |l: &str| l.rfind("── ").unwrap_or(0);
    assert!(indent(c_line) > indent(sub_line));

    let results = SearchEngine::search(&root, &txt_filter());
    let names: HashSet<String> = results.iter().map(|h| h.name()).collect();
    assert_eq!(results.len(), 2);
    assert!(names.contains("a.txt"));
    assert!(names.contains("c.txt"));
}

#[test]
fn test_report_round_trip_matches_destination_file() {
    let harness = helpers::TestHarness::new();
    harness.setup_basic_project();
    let (destination, _out) = harness.destination();

    let report = ReportAggregator::build_report(
        &harness.root(),
        &destination,
        &txt_filter(),
        &ReportConfig::default(),
    )
    .expect("report should build");

    assert_eq!(fs::read_to_string(destination.path()).unwrap(), report);
    assert!(report.starts_with("Tree Structure:\n"));
    assert!(report.contains("a.txt -> a\n"));
    assert!(report.contains("c.txt -> c\n"));
    assert!(!report.contains("b.log ->"));
}

#[test]
fn test_report_honors_max_files_limit() {
    let harness = helpers::TestHarness::new();
    for i in 0..600 {
        harness.create_file(&format!("f{i:03}.txt"), "x");
    }
    let (destination, _out) = harness.destination();

    let report = ReportAggregator::build_report(
        &harness.root(),
        &destination,
        &txt_filter(),
        &ReportConfig::default(),
    )
    .expect("report should build");

    let content_lines = report.lines().filter(|l| l.contains(" -> ")).count();
    assert_eq!(content_lines, 500);
    assert_eq!(
        report
            .lines()
            .filter(|l| l.starts_with("[Safety Limit]"))
            .count(),
        1
    );
    assert!(report.contains("[Safety Limit] Skipped remaining files, max_files=500\n"));
    // Nothing is logged past the safety line.
    assert!(report.ends_with("max_files=500\n"));
}

#[test]
#[traced_test]
fn test_report_degrades_to_existing_ancestor() {
    let harness = helpers::TestHarness::new();
    harness.setup_basic_project();
    let (destination, _out) = harness.destination();

    let missing_root = PathHandle::new(harness.root_path.join("does/not/exist"));
    let report = ReportAggregator::build_report(
        &missing_root,
        &destination,
        &txt_filter(),
        &ReportConfig::default(),
    )
    .expect("missing root must degrade, not fail");

    // The report is built from the nearest existing ancestor.
    assert!(report.contains("a.txt -> a\n"));
    assert!(logs_contain("not found"));
}

#[test]
fn test_report_excludes_special_folder_contents() {
    let harness = helpers::TestHarness::new();
    harness.create_file("keep.txt", "k");
    harness.create_file("venv/lib/site.txt", "v");
    let (destination, _out) = harness.destination();

    let report = ReportAggregator::build_report(
        &harness.root(),
        &destination,
        &txt_filter(),
        &ReportConfig::default(),
    )
    .expect("report should build");

    assert!(report.contains("keep.txt -> k\n"));
    assert!(!report.contains("site.txt"));
    assert!(!report.lines().any(|l| l.ends_with("venv")));
}

#[test]
fn test_copy_then_move_end_state() {
    let harness = helpers::TestHarness::new();
    harness.create_file("original.txt", "payload");

    let original = PathHandle::new(harness.root_path.join("original.txt"));
    let copy_dest = PathHandle::new(harness.root_path.join("copies/copy.txt"));
    let move_dest = PathHandle::new(harness.root_path.join("moved/final.txt"));

    let copy = original.copy_to(&copy_dest).expect("copy should succeed");
    let moved = original.move_to(&move_dest).expect("move should succeed");

    assert!(!original.exists());
    assert_eq!(copy.read().unwrap(), "payload");
    assert_eq!(moved.read().unwrap(), "payload");
}

#[test]
fn test_write_append_read_properties() {
    let harness = helpers::TestHarness::new();
    let handle = PathHandle::new(harness.root_path.join("notes/journal.txt"));

    handle.write("day one\n").expect("write should succeed");
    handle.append("day two\n").expect("append should succeed");
    handle.append("day three\n").expect("append should succeed");

    assert_eq!(handle.read().unwrap(), "day one\nday two\nday three\n");
    assert!(handle
        .read()
        .unwrap()
        .ends_with("day two\nday three\n"));
}

#[test]
fn test_search_result_set_matches_direct_listing() {
    let harness = helpers::TestHarness::new();
    harness.setup_basic_project();
    harness.create_file("deep/nested/more/d.TXT", "d");

    let results = SearchEngine::search(&harness.root(), &txt_filter());
    let found: HashSet<PathBuf> = results
        .iter()
        .map(|h| h.path().to_path_buf())
        .collect();

    let mut expected = HashSet::new();
    for entry in walk(&harness.root_path) {
        let name = entry
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_lowercase();
        if entry.is_file() && name.ends_with(".txt") {
            expected.insert(entry);
        }
    }
    assert_eq!(found, expected);
}

fn walk(root: &std::path::Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path.clone());
            }
            out.push(path);
        }
    }
    out
}
