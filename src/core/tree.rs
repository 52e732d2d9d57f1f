//! Renders a directory's structure as indented text.
//!
//! Rendering never fails: a missing root or an unreadable directory degrades
//! to an empty string with a logged warning, so a cosmetic tree can never
//! abort report generation.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use super::PathHandle;
use crate::utils::paths;

/// A utility struct for rendering directory trees.
///
/// This struct is stateless and provides methods as associated functions.
pub struct TreeRenderer;

impl TreeRenderer {
    /// Renders the tree rooted at `root`.
    ///
    /// The first line is always the root's own name. Per directory level,
    /// hidden entries (leading `.`) are dropped when `ignore_hidden`, and any
    /// directory whose name case-insensitively equals a member of
    /// `excluded_folders` is pruned together with its subtree. Entries are
    /// sorted directories-first, then by case-insensitive name.
    pub fn render(
        root: &PathHandle,
        recursive: bool,
        ignore_hidden: bool,
        excluded_folders: &HashSet<String>,
    ) -> String {
        tracing::debug!("tree started -> {}", root);
        if !root.exists() {
            tracing::warn!("Tree skipped (path not found) -> {}", root);
            return String::new();
        }

        let mut lines = vec![root.name()];
        if root.is_dir() {
            if let Err(e) = Self::render_level(
                root.path(),
                "",
                recursive,
                ignore_hidden,
                excluded_folders,
                &mut lines,
            ) {
                tracing::error!("tree failed -> {} | Reason: {}", root, e);
                return String::new();
            }
        }

        tracing::info!("tree success -> {}", root);
        lines.join("\n")
    }

    fn render_level(
        dir: &Path,
        prefix: &str,
        recursive: bool,
        ignore_hidden: bool,
        excluded_folders: &HashSet<String>,
        lines: &mut Vec<String>,
    ) -> io::Result<()> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_dir = path.is_dir();

            if ignore_hidden && paths::is_hidden(&path) {
                continue;
            }
            if is_dir
                && excluded_folders
                    .iter()
                    .any(|excluded| name.eq_ignore_ascii_case(excluded))
            {
                tracing::debug!("tree skipped excluded folder -> {}", path.display());
                continue;
            }
            entries.push((path, name, is_dir));
        }

        // Directories first, then case-insensitive name.
        entries.sort_by(|a, b| match (a.2, b.2) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.1.to_lowercase().cmp(&b.1.to_lowercase()),
        });

        let last_index = entries.len().saturating_sub(1);
        for (index, (path, name, is_dir)) in entries.into_iter().enumerate() {
            let is_last = index == last_index;
            let connector = if is_last { "└── " } else { "├── " };
            lines.push(format!("{prefix}{connector}{name}"));

            if is_dir && recursive {
                let extension = if is_last { "    " } else { "│   " };
                Self::render_level(
                    &path,
                    &format!("{prefix}{extension}"),
                    recursive,
                    ignore_hidden,
                    excluded_folders,
                    lines,
                )?;
            }
        }
        Ok(())
    }
}
