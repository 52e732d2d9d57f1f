pub mod settings;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Folder names excluded from traversal, search and reports by default.
///
/// `venv` is the conventional virtual-environment folder; pulling its
/// contents into a report is never what the caller wants.
pub fn default_special_folders() -> HashSet<String> {
    ["venv"].iter().map(|name| name.to_string()).collect()
}

fn default_max_files() -> usize {
    500
}

fn default_max_total_bytes() -> u64 {
    50_000_000
}

fn default_true() -> bool {
    true
}

/// Policy knobs for [`crate::core::ReportAggregator`].
///
/// The two safety limits bound the volume of the generated report, not the
/// traversal cost: enumeration still visits every candidate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Maximum number of per-file lines in a report.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
    /// Maximum cumulative byte size of logged file contents.
    #[serde(default = "default_max_total_bytes")]
    pub max_total_bytes: u64,
    /// Folder names whose entire subtree is excluded (e.g. `venv`).
    #[serde(default = "default_special_folders")]
    pub special_folders: HashSet<String>,
    /// Additional library/vendor folder names excluded from reports.
    #[serde(default)]
    pub library_folders: HashSet<String>,
    #[serde(default = "default_true")]
    pub ignore_special_folders: bool,
    #[serde(default = "default_true")]
    pub ignore_library_folders: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_files: default_max_files(),
            max_total_bytes: default_max_total_bytes(),
            special_folders: default_special_folders(),
            library_folders: HashSet::new(),
            ignore_special_folders: true,
            ignore_library_folders: true,
        }
    }
}
