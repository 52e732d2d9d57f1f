//! Core building blocks: path handles, tree rendering, filtered search and
//! bounded report aggregation.

pub mod error;
pub mod handle;
pub mod report;
pub mod search;
pub mod tree;

use std::collections::HashSet;

/// Conjunction of optional predicates evaluated by [`SearchEngine`].
///
/// Every predicate defaults to "no constraint"; an empty filter matches
/// everything (subject to the hidden/excluded-folder defaults).
#[derive(Debug, Clone)]
pub struct SearchFilter {
    /// Case-insensitive substring of the entry name.
    pub name_contains: Option<String>,
    /// Exact extension, case-insensitive; a leading dot is optional.
    pub suffix: Option<String>,
    /// Exact file stem, case-insensitive.
    pub stem: Option<String>,
    /// Regular expression matched against the entry name.
    pub name_regex: Option<String>,
    /// Minimum file size in bytes; directories are not size-checked.
    pub min_size: Option<u64>,
    /// Maximum file size in bytes; directories are not size-checked.
    pub max_size: Option<u64>,
    pub only_files: bool,
    pub only_dirs: bool,
    pub recursive: bool,
    pub ignore_hidden: bool,
    /// Folder names (case-insensitive) whose subtree is excluded.
    pub excluded_folders: HashSet<String>,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            name_contains: None,
            suffix: None,
            stem: None,
            name_regex: None,
            min_size: None,
            max_size: None,
            only_files: false,
            only_dirs: false,
            recursive: true,
            ignore_hidden: true,
            excluded_folders: crate::config::default_special_folders(),
        }
    }
}

pub use error::{CoreError, Result};
pub use handle::PathHandle;
pub use report::ReportAggregator;
pub use search::SearchEngine;
pub use tree::TreeRenderer;
