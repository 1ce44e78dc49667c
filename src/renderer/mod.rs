//! Headless form renderer
//!
//! Holds the live input state for one rendered form instance: current values,
//! per-field validation errors, and per-field sentiment action state. The UI
//! binds widgets to this state; submission validates against the schema,
//! persists a record on success and resets the fields to their defaults.

use crate::file_storage::SubmissionStore;
use crate::models::{FieldType, FormField, SubmissionRecord};
use crate::schema::{build_schema, default_values, FormSchema, SchemaError};
use crate::sentiment::SentimentClient;
use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Per-field validation messages; nothing was persisted
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(HashMap<String, String>),
    /// The submission log could not be written; field state is untouched
    #[error("Failed to save submission: {0}")]
    Storage(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SentimentActionError {
    #[error("No field named '{0}'")]
    UnknownField(String),
    #[error("Field '{0}' is not a sentiment-text field")]
    NotSentimentField(String),
    /// Whitespace-only input is rejected locally, without a network call
    #[error("Enter some text to analyze")]
    EmptyText,
    /// A request for this field is already outstanding
    #[error("Analysis already in progress for '{0}'")]
    Busy(String),
}

/// Live state of one rendered form
pub struct FormRenderer {
    fields: Vec<FormField>,
    schema: FormSchema,
    values: Map<String, Value>,
    errors: HashMap<String, String>,
    /// Display strings for completed sentiment requests, keyed by field name
    sentiments: HashMap<String, String>,
    in_flight: HashSet<String>,
    title: Option<String>,
    description: Option<String>,
}

impl FormRenderer {
    /// Bind a field list to fresh input state, building the schema once
    pub fn new(
        fields: Vec<FormField>,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Self, SchemaError> {
        let schema = build_schema(&fields)?;
        let values = default_values(&fields);
        Ok(Self {
            fields,
            schema,
            values,
            errors: HashMap::new(),
            sentiments: HashMap::new(),
            in_flight: HashSet::new(),
            title,
            description,
        })
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Current raw value of a field
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Set a field's raw value and clear its stale validation error
    pub fn set_value(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
        self.errors.remove(name);
    }

    /// Validation error currently displayed next to a field
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    /// Sentiment result currently displayed next to a field
    pub fn sentiment(&self, name: &str) -> Option<&str> {
        self.sentiments.get(name).map(String::as_str)
    }

    /// Whether the sentiment action for a field is busy
    pub fn is_analyzing(&self, name: &str) -> bool {
        self.in_flight.contains(name)
    }

    /// Run the sentiment action for a `sentiment-text` field.
    ///
    /// The result display string is cached next to the field and, if still
    /// present at submit time, persisted as `<name>_sentiment`. A failed call
    /// displays the literal string "Error" and leaves the field ready for a
    /// retry.
    pub async fn analyze_sentiment(
        &mut self,
        name: &str,
        client: &SentimentClient,
    ) -> Result<String, SentimentActionError> {
        let field = self
            .fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| SentimentActionError::UnknownField(name.to_string()))?;
        if field.field_type != FieldType::SentimentText {
            return Err(SentimentActionError::NotSentimentField(name.to_string()));
        }

        let text = match self.values.get(name) {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };
        if text.trim().is_empty() {
            return Err(SentimentActionError::EmptyText);
        }
        if !self.in_flight.insert(name.to_string()) {
            return Err(SentimentActionError::Busy(name.to_string()));
        }

        let result = client.classify(&text).await;
        self.in_flight.remove(name);

        let display = match result {
            Ok(label) => label.display().to_string(),
            Err(message) => {
                log::warn!("Sentiment analysis failed for '{}': {}", name, message);
                "Error".to_string()
            }
        };
        self.sentiments.insert(name.to_string(), display.clone());
        Ok(display)
    }

    /// Validate and submit the current values.
    ///
    /// On any validation failure the per-field messages are recorded for
    /// display and nothing is persisted. On success the callback receives the
    /// normalized data, a record is appended to the submission log, and all
    /// fields reset to their defaults. A storage failure aborts the submit
    /// and leaves the field state untouched.
    pub fn submit<F>(
        &mut self,
        store: &SubmissionStore,
        on_submit: F,
    ) -> Result<SubmissionRecord, SubmitError>
    where
        F: FnOnce(&Map<String, Value>),
    {
        let normalized = match self.schema.validate(&self.values) {
            Ok(data) => data,
            Err(field_errors) => {
                self.errors = field_errors.clone();
                return Err(SubmitError::Validation(field_errors));
            }
        };
        self.errors.clear();

        on_submit(&normalized);

        let mut data = normalized;
        for field in &self.fields {
            if let Some(result) = self.sentiments.get(&field.name) {
                data.insert(
                    format!("{}_sentiment", field.name),
                    Value::String(result.clone()),
                );
            }
        }

        let record = SubmissionRecord {
            data,
            timestamp: Utc::now().to_rfc3339(),
            form_title: self
                .title
                .clone()
                .unwrap_or_else(|| "Untitled Form".to_string()),
        };

        store.append(record.clone()).map_err(SubmitError::Storage)?;
        log::info!("Form '{}' submitted and saved", record.form_title);

        self.reset();
        Ok(record)
    }

    /// Reset all fields to their defaults and clear transient state
    pub fn reset(&mut self) {
        self.values = default_values(&self.fields);
        self.errors.clear();
        self.sentiments.clear();
    }
}
