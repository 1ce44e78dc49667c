//! Validation schema construction
//!
//! Builds a validator from a runtime list of field descriptors. Each field
//! maps to a tagged rule variant; validation takes the live value map and
//! returns either normalized values or per-field error messages.

use crate::models::{FieldType, FormField};
use regex::Regex;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Invalid pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}

/// The base constraint a field's value must satisfy, derived from its type
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// text, textarea, select, radio and sentiment-text: a string, optionally
    /// bounded by character count
    Text { min: Option<u32>, max: Option<u32> },
    /// A string matching the email grammar, optionally bounded by character count
    Email { min: Option<u32>, max: Option<u32> },
    /// Input coerced to a number; the bounds apply to the numeric value
    Number { min: Option<u32>, max: Option<u32> },
    /// A boolean; `required` means the value must be literally `true`
    Checkbox,
}

/// Validation rule for one field
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub pattern: Option<Regex>,
    pub kind: RuleKind,
}

/// Validator for one ordered field list
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    rules: Vec<FieldRule>,
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email regex"))
}

/// Build a validator from field descriptors.
///
/// Duplicate field names are not rejected here; the later rule overwrites the
/// earlier one's output during validation (last write wins).
pub fn build_schema(fields: &[FormField]) -> Result<FormSchema, SchemaError> {
    let mut rules = Vec::with_capacity(fields.len());

    for field in fields {
        let kind = match field.field_type {
            FieldType::Email => RuleKind::Email {
                min: field.min_length,
                max: field.max_length,
            },
            FieldType::Number => RuleKind::Number {
                min: field.min_length,
                max: field.max_length,
            },
            FieldType::Checkbox => RuleKind::Checkbox,
            FieldType::Text
            | FieldType::Textarea
            | FieldType::Select
            | FieldType::Radio
            | FieldType::SentimentText => RuleKind::Text {
                min: field.min_length,
                max: field.max_length,
            },
        };

        let pattern = match &field.pattern {
            Some(source) => Some(Regex::new(source).map_err(|e| SchemaError::InvalidPattern {
                field: field.name.clone(),
                source: e,
            })?),
            None => None,
        };

        rules.push(FieldRule {
            name: field.name.clone(),
            label: field.label.clone(),
            required: field.required,
            pattern,
            kind,
        });
    }

    Ok(FormSchema { rules })
}

/// Initial value map for a field list: configured defaults, otherwise `false`
/// for checkboxes and the empty string for everything else
pub fn default_values(fields: &[FormField]) -> Map<String, Value> {
    let mut values = Map::new();
    for field in fields {
        values.insert(field.name.clone(), field.initial_value());
    }
    values
}

/// Outcome of coercing a raw value to a number
enum NumericInput {
    Absent,
    Invalid,
    Value(f64),
}

fn coerce_number(raw: Option<&Value>) -> NumericInput {
    match raw {
        None | Some(Value::Null) => NumericInput::Absent,
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) => NumericInput::Value(f),
            None => NumericInput::Invalid,
        },
        Some(Value::String(s)) if s.trim().is_empty() => NumericInput::Absent,
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(f) => NumericInput::Value(f),
            Err(_) => NumericInput::Invalid,
        },
        Some(_) => NumericInput::Invalid,
    }
}

/// String form of a raw value, used by string rules and pattern checks
fn stringify(raw: Option<&Value>) -> String {
    match raw {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

fn number_value(f: f64) -> Value {
    // Keep whole numbers as integers in the persisted JSON
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Value::Number(Number::from(f as i64))
    } else {
        Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
    }
}

impl FormSchema {
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Validate a raw value map.
    ///
    /// Returns the normalized values on success or a map of field name to
    /// human-readable error message on failure. Keys are field names; a
    /// duplicated name silently overwrites the earlier field's entry.
    pub fn validate(
        &self,
        values: &Map<String, Value>,
    ) -> Result<Map<String, Value>, HashMap<String, String>> {
        let mut normalized = Map::new();
        let mut errors: HashMap<String, String> = HashMap::new();

        for rule in &self.rules {
            let raw = values.get(&rule.name);
            // A later duplicate replaces whatever the earlier rule produced
            errors.remove(&rule.name);
            normalized.remove(&rule.name);

            let error = match &rule.kind {
                RuleKind::Text { min, max } | RuleKind::Email { min, max } => {
                    let s = stringify(raw);
                    let err = check_string(rule, &s, *min, *max);
                    if err.is_none() {
                        normalized.insert(rule.name.clone(), Value::String(s));
                    }
                    err
                }
                RuleKind::Number { min, max } => match coerce_number(raw) {
                    NumericInput::Absent if rule.required => {
                        Some(format!("{} is required", rule.label))
                    }
                    NumericInput::Invalid if rule.required => {
                        Some(format!("{} must be a number", rule.label))
                    }
                    // Optional numbers that fail coercion are treated as absent
                    NumericInput::Absent | NumericInput::Invalid => None,
                    NumericInput::Value(f) => {
                        if let Some(min) = min.filter(|m| f < *m as f64) {
                            Some(format!("{} must be at least {}", rule.label, min))
                        } else if let Some(max) = max.filter(|m| f > *m as f64) {
                            Some(format!("{} must be at most {}", rule.label, max))
                        } else {
                            normalized.insert(rule.name.clone(), number_value(f));
                            None
                        }
                    }
                },
                RuleKind::Checkbox => match raw {
                    Some(Value::Bool(true)) => {
                        normalized.insert(rule.name.clone(), Value::Bool(true));
                        None
                    }
                    _ if rule.required => Some(format!("{} must be checked", rule.label)),
                    Some(Value::Bool(false)) | None | Some(Value::Null) => {
                        normalized.insert(rule.name.clone(), Value::Bool(false));
                        None
                    }
                    Some(_) => Some(format!("{} must be a boolean", rule.label)),
                },
            };

            let error = error.or_else(|| {
                rule.pattern.as_ref().and_then(|re| {
                    if re.is_match(&stringify(raw)) {
                        None
                    } else {
                        Some(format!("{} format is invalid", rule.label))
                    }
                })
            });

            if let Some(message) = error {
                normalized.remove(&rule.name);
                errors.insert(rule.name.clone(), message);
            }
        }

        if errors.is_empty() {
            Ok(normalized)
        } else {
            Err(errors)
        }
    }
}

fn check_string(rule: &FieldRule, s: &str, min: Option<u32>, max: Option<u32>) -> Option<String> {
    if matches!(rule.kind, RuleKind::Email { .. }) && !email_regex().is_match(s) {
        return Some("Invalid email address".to_string());
    }
    if rule.required && s.is_empty() {
        return Some(format!("{} is required", rule.label));
    }
    let len = s.chars().count() as u32;
    if let Some(min) = min.filter(|m| len < *m) {
        return Some(format!(
            "{} must be at least {} characters",
            rule.label, min
        ));
    }
    if let Some(max) = max.filter(|m| len > *m) {
        return Some(format!("{} must be at most {} characters", rule.label, max));
    }
    None
}
