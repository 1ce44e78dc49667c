//! Form definition store
//!
//! Maps a human-chosen name to a list of field descriptors, persisted as one
//! JSON object in `formDefinitions.json`. Saving under an existing name
//! overwrites the prior definition silently; there is no versioning.

use super::{read_json, write_json, FileResult, DEFINITIONS_FILE};
use crate::models::FormField;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Store for named form definitions
#[derive(Debug, Clone)]
pub struct DefinitionStore {
    path: PathBuf,
}

impl DefinitionStore {
    /// Create a store backed by `formDefinitions.json` inside `data_dir`
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(DEFINITIONS_FILE),
        }
    }

    /// Read the whole collection; a missing file is an empty collection
    fn read_all(&self) -> FileResult<BTreeMap<String, Vec<FormField>>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        read_json(&self.path)
    }

    /// Insert or overwrite the definition stored under `name`.
    ///
    /// Fails without touching stored state when the name is empty (after
    /// trimming) or the field list is empty.
    pub fn save(&self, name: &str, fields: &[FormField]) -> FileResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err("A form definition needs a name".to_string());
        }
        if fields.is_empty() {
            return Err("A form definition needs at least one field".to_string());
        }

        let mut definitions = self.read_all()?;
        definitions.insert(name.to_string(), fields.to_vec());
        write_json(&self.path, &definitions)?;

        log::info!("Saved form definition '{}' ({} fields)", name, fields.len());
        Ok(())
    }

    /// Load the definition stored under `name`, if any
    pub fn load(&self, name: &str) -> FileResult<Option<Vec<FormField>>> {
        let definitions = self.read_all()?;
        Ok(definitions.get(name).cloned())
    }

    /// List all stored definition names, sorted
    pub fn list(&self) -> FileResult<Vec<String>> {
        let definitions = self.read_all()?;
        Ok(definitions.keys().cloned().collect())
    }

    /// Remove the definition stored under `name`; a missing name is a no-op
    pub fn delete(&self, name: &str) -> FileResult<()> {
        let mut definitions = self.read_all()?;
        if definitions.remove(name).is_some() {
            write_json(&self.path, &definitions)?;
            log::info!("Deleted form definition '{}'", name);
        }
        Ok(())
    }
}
