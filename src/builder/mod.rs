//! Headless definition builder
//!
//! Staged editing state behind the definition-builder UI: fields are drafted
//! one at a time, validated, and collected into an ordered list that is then
//! saved under a chosen name. Select and radio drafts carry their options as
//! one comma-separated string, the way the builder form collects them.

use crate::file_storage::{DefinitionStore, FileResult};
use crate::generate::FieldGenerator;
use crate::models::{FieldOption, FieldType, FormDefinition, FormField};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Field name is required")]
    MissingName,
    #[error("Field label is required")]
    MissingLabel,
    #[error("{0} fields need at least one option")]
    MissingOptions(FieldType),
    #[error("A field named '{0}' already exists in this definition")]
    DuplicateName(String),
    #[error("No field at position {0}")]
    IndexOutOfRange(usize),
}

/// One field as collected by the builder form, before validation
#[derive(Debug, Clone, Default)]
pub struct FieldDraft {
    pub name: String,
    pub label: String,
    pub field_type: Option<FieldType>,
    pub placeholder: String,
    pub default_value: String,
    pub required: bool,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub pattern: String,
    /// Comma-separated option values for select/radio drafts
    pub options: String,
    pub description: String,
}

/// Parse a comma-separated options string into (label, value) pairs.
/// Entries are trimmed; blank entries are dropped; label equals value.
pub fn parse_options(source: &str) -> Vec<FieldOption> {
    source
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| FieldOption {
            label: s.to_string(),
            value: s.to_string(),
        })
        .collect()
}

impl FieldDraft {
    /// Validate the draft and produce a field descriptor
    pub fn build(&self) -> Result<FormField, DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }
        if self.label.trim().is_empty() {
            return Err(DraftError::MissingLabel);
        }
        let field_type = self.field_type.unwrap_or(FieldType::Text);

        let options = if field_type.needs_options() {
            let parsed = parse_options(&self.options);
            if parsed.is_empty() {
                return Err(DraftError::MissingOptions(field_type));
            }
            Some(parsed)
        } else {
            None
        };

        let mut field = FormField::new(self.name.trim(), self.label.trim(), field_type);
        field.placeholder = non_empty(&self.placeholder);
        field.default_value = non_empty(&self.default_value).map(Value::String);
        field.required = self.required;
        field.min_length = self.min_length;
        field.max_length = self.max_length;
        field.pattern = non_empty(&self.pattern);
        field.options = options;
        field.description = non_empty(&self.description);
        Ok(field)
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Staged state of one definition under construction
#[derive(Debug, Clone, Default)]
pub struct DefinitionBuilder {
    name: String,
    fields: Vec<FormField>,
}

impl DefinitionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Append a drafted field. A name already staged in this definition is
    /// rejected here rather than silently overwriting at validation time.
    pub fn add_field(&mut self, draft: &FieldDraft) -> Result<(), DraftError> {
        let field = draft.build()?;
        if self.fields.iter().any(|f| f.name == field.name) {
            return Err(DraftError::DuplicateName(field.name));
        }
        self.fields.push(field);
        Ok(())
    }

    /// Replace the field at `index` with a new draft
    pub fn update_field(&mut self, index: usize, draft: &FieldDraft) -> Result<(), DraftError> {
        if index >= self.fields.len() {
            return Err(DraftError::IndexOutOfRange(index));
        }
        let field = draft.build()?;
        if self
            .fields
            .iter()
            .enumerate()
            .any(|(i, f)| i != index && f.name == field.name)
        {
            return Err(DraftError::DuplicateName(field.name));
        }
        self.fields[index] = field;
        Ok(())
    }

    pub fn remove_field(&mut self, index: usize) -> Result<(), DraftError> {
        if index >= self.fields.len() {
            return Err(DraftError::IndexOutOfRange(index));
        }
        self.fields.remove(index);
        Ok(())
    }

    /// The staged state as a named definition
    pub fn definition(&self) -> FormDefinition {
        FormDefinition {
            name: self.name.clone(),
            fields: self.fields.clone(),
        }
    }

    /// Persist the staged definition under its current name
    pub fn save(&self, store: &DefinitionStore) -> FileResult<()> {
        store.save(&self.name, &self.fields)
    }

    /// Load a stored definition into the builder, replacing the staged state
    pub fn load(&mut self, name: &str, store: &DefinitionStore) -> FileResult<bool> {
        match store.load(name)? {
            Some(fields) => {
                self.name = name.to_string();
                self.fields = fields;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace the staged fields with AI-generated ones. Requires an access
    /// token; the staged state is untouched on failure.
    pub async fn generate_fields(
        &mut self,
        generator: &FieldGenerator,
        access_token: Option<&str>,
        description: &str,
    ) -> Result<(), String> {
        let fields = generator.generate_fields(access_token, description).await?;
        self.fields = fields;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn text_draft(name: &str) -> FieldDraft {
        FieldDraft {
            name: name.to_string(),
            label: format!("{} label", name),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_options_trims_and_drops_blanks() {
        let options = parse_options("Standard, Premium , ,Student");
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].value, "Standard");
        assert_eq!(options[1].label, "Premium");
        assert_eq!(options[2].value, "Student");
        assert!(parse_options("  ").is_empty());
    }

    #[test]
    fn test_draft_requires_name_and_label() {
        let mut draft = FieldDraft::default();
        assert_eq!(draft.build().unwrap_err(), DraftError::MissingName);

        draft.name = "name".to_string();
        assert_eq!(draft.build().unwrap_err(), DraftError::MissingLabel);
    }

    #[test]
    fn test_select_draft_requires_options() {
        let mut draft = text_draft("membership");
        draft.field_type = Some(FieldType::Select);
        assert_eq!(
            draft.build().unwrap_err(),
            DraftError::MissingOptions(FieldType::Select)
        );

        draft.options = "standard, premium".to_string();
        let field = draft.build().unwrap();
        assert_eq!(field.options.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_options_ignored_for_text_drafts() {
        let mut draft = text_draft("name");
        draft.options = "a, b".to_string();
        let field = draft.build().unwrap();
        assert!(field.options.is_none());
    }

    #[test]
    fn test_duplicate_names_rejected_at_add_time() {
        let mut builder = DefinitionBuilder::new();
        builder.add_field(&text_draft("name")).unwrap();

        let err = builder.add_field(&text_draft("name")).unwrap_err();
        assert_eq!(err, DraftError::DuplicateName("name".to_string()));
        assert_eq!(builder.fields().len(), 1);
    }

    #[test]
    fn test_update_field_keeps_own_name() {
        let mut builder = DefinitionBuilder::new();
        builder.add_field(&text_draft("name")).unwrap();
        builder.add_field(&text_draft("email")).unwrap();

        // Re-saving the field under its own name is fine
        let mut draft = text_draft("name");
        draft.required = true;
        builder.update_field(0, &draft).unwrap();
        assert!(builder.fields()[0].required);

        // Renaming it onto another staged field is not
        let err = builder.update_field(0, &text_draft("email")).unwrap_err();
        assert_eq!(err, DraftError::DuplicateName("email".to_string()));
    }

    #[test]
    fn test_remove_field() {
        let mut builder = DefinitionBuilder::new();
        builder.add_field(&text_draft("name")).unwrap();

        assert_eq!(
            builder.remove_field(3).unwrap_err(),
            DraftError::IndexOutOfRange(3)
        );
        builder.remove_field(0).unwrap();
        assert!(builder.fields().is_empty());
    }

    #[test]
    fn test_definition_snapshot() {
        let mut builder = DefinitionBuilder::new();
        builder.set_name("Club Form");
        builder.add_field(&text_draft("name")).unwrap();

        let definition = builder.definition();
        assert_eq!(definition.name, "Club Form");
        assert_eq!(definition.fields.len(), 1);
    }

    #[test]
    fn test_save_load_round_trip_through_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = DefinitionStore::new(temp_dir.path());

        let mut builder = DefinitionBuilder::new();
        builder.set_name("Club Form");
        builder.add_field(&text_draft("name")).unwrap();
        builder.save(&store).unwrap();

        let mut other = DefinitionBuilder::new();
        assert!(other.load("Club Form", &store).unwrap());
        assert_eq!(other.name(), "Club Form");
        assert_eq!(other.fields(), builder.fields());

        assert!(!other.load("missing", &store).unwrap());
    }

    #[test]
    fn test_save_without_name_or_fields_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = DefinitionStore::new(temp_dir.path());

        let mut builder = DefinitionBuilder::new();
        builder.add_field(&text_draft("name")).unwrap();
        assert!(builder.save(&store).is_err());

        builder.set_name("Club Form");
        builder.remove_field(0).unwrap();
        assert!(builder.save(&store).is_err());
    }
}
