//! File-based storage module for dynaform
//!
//! Both collections live as single JSON files inside one data directory,
//! mirroring the two browser storage keys:
//! - `formDefinitions.json` - definition name -> field descriptor list
//! - `dynamicFormsData.json` - append-only submission log
//!
//! Every operation reads, modifies and rewrites the whole collection. Writes
//! are atomic within one process (temp file + rename); concurrent processes
//! race with last-writer-wins and no detection.

pub mod definitions;
pub mod submissions;

pub use definitions::DefinitionStore;
pub use submissions::SubmissionStore;

use std::fs;
use std::path::{Path, PathBuf};

/// Common file operations result type
pub type FileResult<T> = Result<T, String>;

/// Definitions collection file name, matching the browser storage key
pub const DEFINITIONS_FILE: &str = "formDefinitions.json";

/// Submissions collection file name, matching the browser storage key
pub const SUBMISSIONS_FILE: &str = "dynamicFormsData.json";

/// Get the default global data directory in user home
pub fn get_global_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".dynaform")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> FileResult<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| format!("Failed to create directory {:?}: {}", path, e))?;
    }
    Ok(())
}

/// Write data to a file atomically (temp file + rename)
pub fn atomic_write(path: &Path, content: &str) -> FileResult<()> {
    let temp_path = path.with_extension("tmp");

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    // Write to temp file
    fs::write(&temp_path, content)
        .map_err(|e| format!("Failed to write temp file {:?}: {}", temp_path, e))?;

    // Atomic rename
    fs::rename(&temp_path, path)
        .map_err(|e| format!("Failed to rename {:?} to {:?}: {}", temp_path, path, e))?;

    Ok(())
}

/// Read a JSON file and deserialize it
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> FileResult<T> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read file {:?}: {}", path, e))?;

    serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse JSON from {:?}: {}", path, e))
}

/// Write data as pretty-printed JSON atomically
pub fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> FileResult<()> {
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| format!("Failed to serialize to JSON: {}", e))?;

    atomic_write(path, &content)
}
