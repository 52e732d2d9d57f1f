//! Composes tree rendering, search results and file contents into one
//! bounded report.
//!
//! The aggregator is the policy-heavy piece: it degrades a missing root to
//! its nearest existing ancestor, substitutes placeholders for unreadable
//! candidates, and truncates at the configured safety limits. The only loud
//! failure is the final persistence step, because losing the requested
//! output file is user-visible.

use std::collections::HashSet;

use super::error::{CoreError, Result};
use super::{PathHandle, SearchEngine, SearchFilter, TreeRenderer};
use crate::config::ReportConfig;
use crate::utils::paths;

/// A utility struct for building directory snapshot reports.
///
/// This struct is stateless and provides methods as associated functions.
pub struct ReportAggregator;

impl ReportAggregator {
    /// Builds the report for `root`, writes it to `destination` and returns
    /// the identical text.
    ///
    /// Layout: a "Tree Structure:" block, then a "Search Results:" block
    /// with one `<path> -> <content>` line per logged file (or the literal
    /// `Search Results: None` when nothing was logged). Once `max_files` or
    /// `max_total_bytes` is breached, a single `[Safety Limit]` line is
    /// appended and no further candidates are processed.
    pub fn build_report(
        root: &PathHandle,
        destination: &PathHandle,
        filter: &SearchFilter,
        config: &ReportConfig,
    ) -> Result<String> {
        tracing::debug!("build_report started -> {}", root);

        // Degrade a missing root to its nearest existing ancestor.
        let mut base = root.path().to_path_buf();
        while !base.exists() {
            match base.parent() {
                Some(parent) => base = parent.to_path_buf(),
                None => break,
            }
        }
        if base != root.path() {
            tracing::warn!(
                "build_report: path {} not found, reporting from {}",
                root,
                base.display()
            );
        }
        let base = PathHandle::from_resolved(base);

        let no_exclusions = HashSet::new();
        let tree_excluded = if config.ignore_special_folders {
            &config.special_folders
        } else {
            &no_exclusions
        };
        let tree_text = TreeRenderer::render(&base, true, filter.ignore_hidden, tree_excluded);

        let mut report = String::new();
        report.push_str("Tree Structure:\n");
        report.push_str(&tree_text);
        report.push_str("\n\n");

        let candidates = SearchEngine::search(&base, filter);

        let mut output_lines: Vec<String> = Vec::new();
        let mut logged_files: usize = 0;
        let mut total_bytes: u64 = 0;

        for candidate in &candidates {
            // Defense-in-depth on top of the search filter: the excluded
            // sets configured here may differ from the filter's.
            if config.ignore_special_folders
                && paths::has_excluded_segment(candidate.path(), &config.special_folders)
            {
                continue;
            }
            if config.ignore_library_folders
                && paths::has_excluded_segment(candidate.path(), &config.library_folders)
            {
                continue;
            }

            // An unreadable candidate still consumes count and byte budget.
            let content = match candidate.read() {
                Ok(content) => content,
                Err(e) => format!("[Could not read: {e}]"),
            };

            logged_files += 1;
            total_bytes += content.len() as u64;

            if logged_files > config.max_files {
                output_lines.push(format!(
                    "[Safety Limit] Skipped remaining files, max_files={}\n",
                    config.max_files
                ));
                break;
            }
            if total_bytes > config.max_total_bytes {
                output_lines.push(format!(
                    "[Safety Limit] Max total_size reached, {} bytes\n",
                    config.max_total_bytes
                ));
                break;
            }

            output_lines.push(format!("{} -> {}\n", candidate, content));
        }

        if output_lines.is_empty() {
            report.push_str("Search Results: None\n");
        } else {
            report.push_str("Search Results:\n");
            for line in &output_lines {
                report.push_str(line);
            }
        }

        if let Err(e) = destination.write(&report) {
            tracing::error!("build_report failed -> {} | Reason: {}", root, e);
            return Err(CoreError::OperationFailure {
                action: "build_report",
                path: destination.path().to_path_buf(),
                source: Box::new(e),
            });
        }

        tracing::info!("build_report success -> {}", root);
        Ok(report)
    }
}
