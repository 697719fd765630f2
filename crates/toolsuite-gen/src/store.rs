// crates/toolsuite-gen/src/store.rs
// ============================================================================
// Module: Suite Store
// Description: Persistence interface for generated test files.
// Purpose: Isolate file-system effects behind a trait with file and in-memory backends.
// Dependencies: thiserror, toolsuite-core
// ============================================================================

//! ## Overview
//! A [`SuiteStore`] maps a [`ToolName`] to exactly one generated file.
//! [`FileSuiteStore`] writes `{root}/{tool}{extension}` and replaces files via
//! a temporary sibling plus rename, so readers only ever observe a complete
//! file. [`MemorySuiteStore`] backs unit tests without touching disk.
//!
//! Removal is idempotent: deleting a tool with no file reports
//! [`RemoveOutcome::Absent`] instead of failing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use thiserror::Error;
use toolsuite_core::ToolName;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default extension appended to tool names.
pub const DEFAULT_EXTENSION: &str = ".test.ts";

/// Maximum length of a single generated file name.
const MAX_FILE_NAME_LENGTH: usize = 255;

/// Attempts made to allocate a unique temporary sibling.
const TEMP_ATTEMPTS: usize = 16;

/// Per-process counter distinguishing temporary siblings.
static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

// ============================================================================
// SECTION: Interface
// ============================================================================

/// Errors raised by suite stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("io error at {path}: {message}")]
    Io {
        /// Path involved in the failure.
        path: String,
        /// Underlying error message.
        message: String,
    },
    /// The tool name cannot be mapped to a safe location.
    #[error("invalid suite location: {0}")]
    InvalidLocation(String),
}

/// Result of removing a generated suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// A file existed and was deleted.
    Removed,
    /// No file existed; nothing to do.
    Absent,
}

/// Persistence backend for generated suites.
///
/// # Invariants
/// - Each tool maps to exactly one location.
/// - `write` fully replaces previous content.
/// - `remove` on an absent suite returns [`RemoveOutcome::Absent`].
pub trait SuiteStore {
    /// Returns a display form of the tool's location.
    fn location(&self, tool: &ToolName) -> String;

    /// Reads the current suite content, if present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the content exists but cannot be read.
    fn read(&self, tool: &ToolName) -> Result<Option<String>, StoreError>;

    /// Returns true when a suite exists for the tool, without reading its content.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when presence cannot be determined.
    fn exists(&self, tool: &ToolName) -> Result<bool, StoreError>;

    /// Writes suite content, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the content cannot be persisted.
    fn write(&mut self, tool: &ToolName, contents: &str) -> Result<(), StoreError>;

    /// Removes the suite for a tool.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when an existing suite cannot be deleted.
    fn remove(&mut self, tool: &ToolName) -> Result<RemoveOutcome, StoreError>;

    /// Lists tools with a stored suite, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing location cannot be enumerated.
    fn list(&self) -> Result<Vec<ToolName>, StoreError>;
}

// ============================================================================
// SECTION: File Store
// ============================================================================

/// File-system suite store rooted at an output directory.
///
/// # Invariants
/// - Files are written as `{root}/{tool}{extension}`.
/// - Writes go through a uniquely named temporary sibling and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileSuiteStore {
    /// Output directory.
    root: PathBuf,
    /// File extension including the leading dot.
    extension: String,
}

impl FileSuiteStore {
    /// Creates a store using [`DEFAULT_EXTENSION`].
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_extension(root, DEFAULT_EXTENSION)
    }

    /// Creates a store with a custom extension.
    #[must_use]
    pub fn with_extension(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// Returns the output directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file path for a tool.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidLocation`] when the file name is not a single safe
    /// component.
    pub fn path_for(&self, tool: &ToolName) -> Result<PathBuf, StoreError> {
        let file_name = format!("{tool}{}", self.extension);
        if file_name.len() > MAX_FILE_NAME_LENGTH
            || file_name.starts_with('.')
            || file_name.contains(['/', '\\'])
        {
            return Err(StoreError::InvalidLocation(file_name));
        }
        Ok(self.root.join(file_name))
    }

}

/// Maps an io error into a [`StoreError`] for `path`.
fn io_error(path: &Path, err: &std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

impl SuiteStore for FileSuiteStore {
    fn location(&self, tool: &ToolName) -> String {
        self.path_for(tool).map_or_else(
            |_| format!("{}/{tool}{}", self.root.display(), self.extension),
            |path| path.display().to_string(),
        )
    }

    fn read(&self, tool: &ToolName) -> Result<Option<String>, StoreError> {
        let path = self.path_for(tool)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&path, &err)),
        }
    }

    fn exists(&self, tool: &ToolName) -> Result<bool, StoreError> {
        let path = self.path_for(tool)?;
        match fs::symlink_metadata(&path) {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(io_error(&path, &err)),
        }
    }

    fn write(&mut self, tool: &ToolName, contents: &str) -> Result<(), StoreError> {
        let path = self.path_for(tool)?;
        fs::create_dir_all(&self.root).map_err(|err| io_error(&self.root, &err))?;
        let (temp_path, file) = create_temp_sibling(&path)?;
        let written = write_synced(file, &temp_path, contents)
            .and_then(|()| fs::rename(&temp_path, &path).map_err(|err| io_error(&path, &err)));
        if written.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        written
    }

    fn remove(&mut self, tool: &ToolName) -> Result<RemoveOutcome, StoreError> {
        let path = self.path_for(tool)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(RemoveOutcome::Removed),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(RemoveOutcome::Absent),
            Err(err) => Err(io_error(&path, &err)),
        }
    }

    fn list(&self) -> Result<Vec<ToolName>, StoreError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(io_error(&self.root, &err)),
        };
        let mut tools = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| io_error(&self.root, &err))?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            let Some(stem) = file_name.strip_suffix(self.extension.as_str()) else {
                continue;
            };
            if let Ok(tool) = ToolName::parse(stem) {
                tools.push(tool);
            }
        }
        tools.sort();
        Ok(tools)
    }
}

/// Creates a fresh `.{file}.tmp.{pid}.{n}` sibling of `path`.
///
/// The sibling is opened with `create_new`, so an existing file or symlink at
/// that name is never reused.
fn create_temp_sibling(path: &Path) -> Result<(PathBuf, fs::File), StoreError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| StoreError::InvalidLocation(path.display().to_string()))?;
    for _ in 0 .. TEMP_ATTEMPTS {
        let attempt = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let temp_path = parent.join(format!(".{file_name}.tmp.{}.{attempt}", process::id()));
        match fs::OpenOptions::new().write(true).create_new(true).open(&temp_path) {
            Ok(file) => return Ok((temp_path, file)),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {}
            Err(err) => return Err(io_error(&temp_path, &err)),
        }
    }
    Err(StoreError::Io {
        path: path.display().to_string(),
        message: "failed to allocate temporary sibling".to_string(),
    })
}

/// Writes `contents` through `file` and flushes it to disk; the handle closes on every path.
fn write_synced(mut file: fs::File, path: &Path, contents: &str) -> Result<(), StoreError> {
    file.write_all(contents.as_bytes()).map_err(|err| io_error(path, &err))?;
    file.sync_all().map_err(|err| io_error(path, &err))
}

// ============================================================================
// SECTION: Memory Store
// ============================================================================

/// In-memory suite store.
#[derive(Debug, Clone, Default)]
pub struct MemorySuiteStore {
    /// Stored suite content keyed by tool.
    files: BTreeMap<ToolName, String>,
}

impl MemorySuiteStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns stored content for a tool.
    #[must_use]
    pub fn get(&self, tool: &ToolName) -> Option<&str> {
        self.files.get(tool).map(String::as_str)
    }

    /// Returns the number of stored suites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true when no suites are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl SuiteStore for MemorySuiteStore {
    fn location(&self, tool: &ToolName) -> String {
        format!("memory://{tool}")
    }

    fn read(&self, tool: &ToolName) -> Result<Option<String>, StoreError> {
        Ok(self.files.get(tool).cloned())
    }

    fn exists(&self, tool: &ToolName) -> Result<bool, StoreError> {
        Ok(self.files.contains_key(tool))
    }

    fn write(&mut self, tool: &ToolName, contents: &str) -> Result<(), StoreError> {
        self.files.insert(tool.clone(), contents.to_string());
        Ok(())
    }

    fn remove(&mut self, tool: &ToolName) -> Result<RemoveOutcome, StoreError> {
        Ok(match self.files.remove(tool) {
            Some(_) => RemoveOutcome::Removed,
            None => RemoveOutcome::Absent,
        })
    }

    fn list(&self) -> Result<Vec<ToolName>, StoreError> {
        Ok(self.files.keys().cloned().collect())
    }
}
