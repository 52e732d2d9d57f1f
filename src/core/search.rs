//! Walks a subtree and returns entries matching a conjunction of filters.
//!
//! Search never raises for per-candidate faults: unreadable entries are
//! skipped and a malformed regex pattern is logged and excludes candidates
//! while the search itself still completes. A missing root degrades to an
//! empty result with a logged warning, mirroring tree rendering.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use walkdir::WalkDir;

use super::{PathHandle, SearchFilter};
use crate::utils::paths;

/// A utility struct for filtered subtree enumeration.
///
/// This struct is stateless and provides methods as associated functions.
pub struct SearchEngine;

impl SearchEngine {
    /// Returns every entry under `root` matching all active predicates of
    /// `filter`, in filesystem enumeration order. Callers may only rely on
    /// set membership, not on a particular ordering.
    ///
    /// When `root` is itself a file, it is the only candidate (the filter
    /// still applies to it).
    pub fn search(root: &PathHandle, filter: &SearchFilter) -> Vec<PathHandle> {
        tracing::debug!("search started -> {}", root);
        if !root.exists() {
            tracing::warn!("Search skipped (path not found) -> {}", root);
            return Vec::new();
        }

        let name_regex = filter.name_regex.as_deref().and_then(|pattern| {
            match Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    // Candidates are treated as non-matches; the search
                    // still completes.
                    tracing::error!("search-regex failed -> {} | Reason: {}", root, e);
                    None
                }
            }
        });

        let candidates: Vec<PathBuf> = if root.is_file() {
            vec![root.path().to_path_buf()]
        } else {
            let mut walker = WalkDir::new(root.path()).min_depth(1).follow_links(false);
            if !filter.recursive {
                walker = walker.max_depth(1);
            }
            walker
                .into_iter()
                .filter_map(std::result::Result::ok)
                .map(|entry| entry.into_path())
                .collect()
        };

        let mut results = Vec::new();
        for candidate in candidates {
            if Self::matches_filter(&candidate, filter, name_regex.as_ref()) {
                results.push(PathHandle::from_resolved(candidate));
            }
        }

        tracing::info!("search success -> {}", root);
        results
    }

    /// Checks a single candidate against all active predicates, cheapest and
    /// most exclusionary first.
    fn matches_filter(path: &Path, filter: &SearchFilter, name_regex: Option<&Regex>) -> bool {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

        if filter.ignore_hidden && paths::is_hidden(path) {
            return false;
        }
        if paths::has_excluded_segment(path, &filter.excluded_folders) {
            tracing::debug!("search skipped excluded path -> {}", path.display());
            return false;
        }

        let is_file = path.is_file();
        if filter.only_files && !is_file {
            return false;
        }
        if filter.only_dirs && !path.is_dir() {
            return false;
        }

        if let Some(needle) = &filter.name_contains {
            if !name.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if let Some(suffix) = &filter.suffix {
            if !Self::matches_suffix(path, suffix) {
                return false;
            }
        }
        if let Some(stem) = &filter.stem {
            let file_stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            if !file_stem.eq_ignore_ascii_case(stem) {
                return false;
            }
        }
        if filter.name_regex.is_some() {
            match name_regex {
                Some(re) if re.is_match(name) => {}
                _ => return false,
            }
        }

        // Size bounds apply to files only; directories pass through.
        if is_file && (filter.min_size.is_some() || filter.max_size.is_some()) {
            let size = match fs::metadata(path) {
                Ok(metadata) => metadata.len(),
                Err(_) => return false,
            };
            if filter.min_size.is_some_and(|min| size < min) {
                return false;
            }
            if filter.max_size.is_some_and(|max| size > max) {
                return false;
            }
        }

        true
    }

    /// Checks a candidate's extension against the filter value; a leading
    /// dot in the filter is optional (".txt" and "txt" are equivalent).
    fn matches_suffix(path: &Path, suffix_filter: &str) -> bool {
        let wanted = suffix_filter.strip_prefix('.').unwrap_or(suffix_filter);
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => ext.eq_ignore_ascii_case(wanted),
            None => wanted.is_empty(),
        }
    }
}
