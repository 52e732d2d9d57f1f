//! Path resolution helpers shared by the core modules.
//!
//! All handles carry absolute, lexically normalized paths, so normalization
//! must work without touching the filesystem (the path may not exist yet).

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Lexically normalizes a path: folds `.` away and resolves `..` against the
/// preceding component. Symlinks are not followed and the filesystem is never
/// consulted.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root.
                if !matches!(normalized.components().last(), Some(Component::RootDir)) {
                    normalized.pop();
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Resolves `input` to an absolute, normalized path.
///
/// Relative inputs are joined onto `base` when given, otherwise onto the
/// process current working directory. This is the documented, deterministic
/// default for relative inputs.
pub fn absolutize(input: &Path, base: Option<&Path>) -> PathBuf {
    if input.is_absolute() {
        return normalize(input);
    }
    let base = match base {
        Some(base) if base.is_absolute() => base.to_path_buf(),
        Some(base) => absolutize(base, None),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/")),
    };
    normalize(&base.join(input))
}

/// Check if a path's final component is hidden (starts with '.')
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Returns true when ANY segment of `path` equals one of `names`,
/// case-insensitively. Used to prune excluded folders and everything below
/// them.
pub fn has_excluded_segment(path: &Path, names: &HashSet<String>) -> bool {
    if names.is_empty() {
        return false;
    }
    path.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .map(|segment| names.iter().any(|name| segment.eq_ignore_ascii_case(name)))
            .unwrap_or(false)
    })
}
