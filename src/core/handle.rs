//! Immutable, resolved filesystem location values.
//!
//! A [`PathHandle`] resolves its input exactly once at construction and never
//! rebinds; every operation that yields a new location returns a new handle.
//! This keeps handles safe to clone and pass around without aliasing a shared
//! mutable path.

use std::fmt;
use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use walkdir::WalkDir;

use super::error::{CoreError, Result};
use crate::utils::paths;

/// A resolved, immutable reference to one filesystem location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathHandle {
    resolved: PathBuf,
}

impl PathHandle {
    /// Creates a handle for `input`, resolving relative inputs against the
    /// process current working directory.
    pub fn new<P: AsRef<Path>>(input: P) -> Self {
        Self {
            resolved: paths::absolutize(input.as_ref(), None),
        }
    }

    /// Creates a handle for `input`, resolving relative inputs against an
    /// explicit base directory.
    pub fn with_base<P: AsRef<Path>, B: AsRef<Path>>(input: P, base: B) -> Self {
        Self {
            resolved: paths::absolutize(input.as_ref(), Some(base.as_ref())),
        }
    }

    /// Wraps a path that is already absolute and normalized.
    pub(crate) fn from_resolved(resolved: PathBuf) -> Self {
        Self { resolved }
    }

    // -------------------------
    // Info queries
    // -------------------------

    /// The resolved, absolute path.
    pub fn path(&self) -> &Path {
        &self.resolved
    }

    /// File or folder name, empty at the filesystem root.
    pub fn name(&self) -> String {
        self.resolved
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File name without its extension.
    pub fn stem(&self) -> String {
        self.resolved
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File extension without the leading dot, `None` when absent.
    pub fn suffix(&self) -> Option<String> {
        self.resolved
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
    }

    pub fn exists(&self) -> bool {
        self.resolved.exists()
    }

    pub fn is_file(&self) -> bool {
        self.resolved.is_file()
    }

    pub fn is_dir(&self) -> bool {
        self.resolved.is_dir()
    }

    /// Parent location as a new handle; the filesystem root yields itself.
    pub fn parent(&self) -> PathHandle {
        match self.resolved.parent() {
            Some(parent) => PathHandle::from_resolved(parent.to_path_buf()),
            None => self.clone(),
        }
    }

    /// Returns a new handle for this path joined with a relative component.
    pub fn join<P: AsRef<Path>>(&self, relative: P) -> PathHandle {
        PathHandle::from_resolved(paths::normalize(&self.resolved.join(relative.as_ref())))
    }

    /// File size in bytes, or the recursive sum of file sizes for a
    /// directory.
    pub fn size(&self) -> Result<u64> {
        if !self.exists() {
            return Err(CoreError::PathNotFound(self.resolved.clone()));
        }
        if self.is_file() {
            let metadata = self.metadata()?;
            return Ok(metadata.len());
        }
        let mut total = 0;
        for entry in WalkDir::new(&self.resolved)
            .follow_links(false)
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            if entry.file_type().is_file() {
                if let Ok(metadata) = entry.metadata() {
                    total += metadata.len();
                }
            }
        }
        Ok(total)
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> Result<DateTime<Local>> {
        let created = self
            .metadata()?
            .created()
            .map_err(|e| CoreError::Io(e, self.resolved.clone()))?;
        Ok(DateTime::<Local>::from(created))
    }

    /// Last modification timestamp.
    pub fn modified_at(&self) -> Result<DateTime<Local>> {
        let modified = self
            .metadata()?
            .modified()
            .map_err(|e| CoreError::Io(e, self.resolved.clone()))?;
        Ok(DateTime::<Local>::from(modified))
    }

    fn metadata(&self) -> Result<fs::Metadata> {
        fs::metadata(&self.resolved).map_err(|e| CoreError::Io(e, self.resolved.clone()))
    }

    // -------------------------
    // Logger helpers
    // -------------------------

    fn log_start(&self, action: &str) {
        tracing::debug!("{} started -> {}", action, self);
    }

    fn log_success(&self, action: &str) {
        tracing::info!("{} success -> {}", action, self);
    }

    fn log_error(&self, action: &str, reason: &dyn fmt::Display) {
        tracing::error!("{} failed -> {} | Reason: {}", action, self, reason);
    }

    // -------------------------
    // File actions
    // -------------------------

    /// Reads the file as UTF-8 text.
    pub fn read(&self) -> Result<String> {
        self.log_start("read");
        if !self.exists() {
            let err = CoreError::PathNotFound(self.resolved.clone());
            self.log_error("read", &err);
            return Err(err);
        }
        if !self.is_file() {
            let err = CoreError::NotAFile(self.resolved.clone());
            self.log_error("read", &err);
            return Err(err);
        }
        match fs::read_to_string(&self.resolved) {
            Ok(content) => {
                self.log_success("read");
                Ok(content)
            }
            Err(e) => {
                self.log_error("read", &e);
                Err(CoreError::Io(e, self.resolved.clone()))
            }
        }
    }

    /// Writes `data` to the file, creating missing parent directories and
    /// replacing any existing content.
    pub fn write(&self, data: &str) -> Result<&Self> {
        self.log_start("write");
        match self.write_inner(data) {
            Ok(()) => {
                self.log_success("write");
                Ok(self)
            }
            Err(e) => {
                self.log_error("write", &e);
                Err(CoreError::WriteFailure {
                    path: self.resolved.clone(),
                    source: e,
                })
            }
        }
    }

    fn write_inner(&self, data: &str) -> io::Result<()> {
        if let Some(parent) = self.resolved.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.resolved, data)
    }

    /// Appends `data` to the file, with the same parent-creation guarantee
    /// as [`PathHandle::write`].
    pub fn append(&self, data: &str) -> Result<&Self> {
        self.log_start("append");
        match self.append_inner(data) {
            Ok(()) => {
                self.log_success("append");
                Ok(self)
            }
            Err(e) => {
                self.log_error("append", &e);
                Err(CoreError::WriteFailure {
                    path: self.resolved.clone(),
                    source: e,
                })
            }
        }
    }

    fn append_inner(&self, data: &str) -> io::Result<()> {
        if let Some(parent) = self.resolved.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.resolved)?;
        file.write_all(data.as_bytes())
    }

    /// Creates the directory. With `parents` missing ancestors are created as
    /// well; with `ok_if_exists` an already existing directory is not an
    /// error.
    pub fn mkdir(&self, parents: bool, ok_if_exists: bool) -> Result<&Self> {
        self.log_start("mkdir");
        // create_dir_all succeeds on an existing directory, so the
        // ok_if_exists contract has to be checked up front.
        if !ok_if_exists && self.is_dir() {
            let e = io::Error::new(io::ErrorKind::AlreadyExists, "directory already exists");
            self.log_error("mkdir", &e);
            return Err(CoreError::OperationFailure {
                action: "mkdir",
                path: self.resolved.clone(),
                source: Box::new(e),
            });
        }
        let result = if parents {
            fs::create_dir_all(&self.resolved)
        } else {
            fs::create_dir(&self.resolved)
        };
        match result {
            Ok(()) => {
                self.log_success("mkdir");
                Ok(self)
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && ok_if_exists && self.is_dir() => {
                self.log_success("mkdir");
                Ok(self)
            }
            Err(e) => {
                self.log_error("mkdir", &e);
                Err(CoreError::OperationFailure {
                    action: "mkdir",
                    path: self.resolved.clone(),
                    source: Box::new(e),
                })
            }
        }
    }

    /// Deletes the file, or the directory and everything below it.
    pub fn delete(&self) -> Result<&Self> {
        self.log_start("delete");
        if !self.exists() {
            let err = CoreError::PathNotFound(self.resolved.clone());
            self.log_error("delete", &err);
            return Err(err);
        }
        let result = if self.is_file() {
            fs::remove_file(&self.resolved)
        } else {
            fs::remove_dir_all(&self.resolved)
        };
        match result {
            Ok(()) => {
                self.log_success("delete");
                Ok(self)
            }
            Err(e) => {
                self.log_error("delete", &e);
                Err(CoreError::DeleteFailure {
                    path: self.resolved.clone(),
                    source: e,
                })
            }
        }
    }

    /// Copies the file, or the directory tree, to `destination`.
    ///
    /// Directory copies merge into an already existing destination directory.
    /// Returns a handle for the destination.
    pub fn copy_to(&self, destination: &PathHandle) -> Result<PathHandle> {
        self.log_start("copy_to");
        match self.copy_inner(destination) {
            Ok(()) => {
                self.log_success("copy_to");
                Ok(destination.clone())
            }
            Err(e) => {
                self.log_error("copy_to", &e);
                Err(CoreError::OperationFailure {
                    action: "copy_to",
                    path: destination.path().to_path_buf(),
                    source: e,
                })
            }
        }
    }

    fn copy_inner(
        &self,
        destination: &PathHandle,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.is_file() {
            if let Some(parent) = destination.path().parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&self.resolved, destination.path())?;
        } else {
            fs::create_dir_all(destination.path())?;
            let mut options = fs_extra::dir::CopyOptions::new();
            options.overwrite = true;
            options.content_only = true;
            fs_extra::dir::copy(&self.resolved, destination.path(), &options)?;
        }
        Ok(())
    }

    /// Moves the file or directory to `destination` and returns a handle for
    /// the new location. Falls back to copy-and-delete when a plain rename is
    /// not possible (e.g. across filesystems).
    pub fn move_to(&self, destination: &PathHandle) -> Result<PathHandle> {
        self.log_start("move_to");
        match self.move_inner(destination) {
            Ok(()) => {
                self.log_success("move_to");
                Ok(destination.clone())
            }
            Err(e) => {
                self.log_error("move_to", &e);
                Err(CoreError::OperationFailure {
                    action: "move_to",
                    path: destination.path().to_path_buf(),
                    source: e,
                })
            }
        }
    }

    fn move_inner(
        &self,
        destination: &PathHandle,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(parent) = destination.path().parent() {
            fs::create_dir_all(parent)?;
        }
        if fs::rename(&self.resolved, destination.path()).is_ok() {
            return Ok(());
        }
        self.copy_inner(destination)?;
        if self.is_file() {
            fs::remove_file(&self.resolved)?;
        } else {
            fs::remove_dir_all(&self.resolved)?;
        }
        Ok(())
    }
}

impl fmt::Display for PathHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.resolved.display().fmt(f)
    }
}
