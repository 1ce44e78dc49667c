// Data models matching the persisted JSON shapes

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The input widget kinds a field can render as.
///
/// `SentimentText` is a free-text field with an extra action that sends
/// its content to the sentiment scoring endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Text,
    Email,
    Number,
    Textarea,
    Checkbox,
    Select,
    Radio,
    SentimentText,
}

impl FieldType {
    /// Returns all available field types
    pub fn all() -> &'static [FieldType] {
        &[
            FieldType::Text,
            FieldType::Email,
            FieldType::Number,
            FieldType::Textarea,
            FieldType::Checkbox,
            FieldType::Select,
            FieldType::Radio,
            FieldType::SentimentText,
        ]
    }

    /// Returns the string representation of this field type
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Textarea => "textarea",
            FieldType::Checkbox => "checkbox",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::SentimentText => "sentiment-text",
        }
    }

    /// Whether this type requires a non-empty `options` list
    pub fn needs_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(FieldType::Text),
            "email" => Ok(FieldType::Email),
            "number" => Ok(FieldType::Number),
            "textarea" => Ok(FieldType::Textarea),
            "checkbox" => Ok(FieldType::Checkbox),
            "select" => Ok(FieldType::Select),
            "radio" => Ok(FieldType::Radio),
            "sentiment-text" => Ok(FieldType::SentimentText),
            _ => Err(format!(
                "Unknown field type: '{}'. Expected one of: text, email, number, textarea, checkbox, select, radio, sentiment-text",
                s
            )),
        }
    }
}

/// One selectable option of a `select` or `radio` field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

/// Static description of one form input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Unique within a definition; also the key the submitted value is stored under
    pub name: String,
    /// Display label, used verbatim in validation messages
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// String for text-like fields, boolean for checkboxes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub required: bool,
    /// Bounds string length for text-like types, numeric value for `number`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    /// Regex source the (stringified) value must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Present for `select` and `radio`, ignored otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FormField {
    /// Create a bare field of the given type with no constraints
    pub fn new(name: &str, label: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            field_type,
            placeholder: None,
            default_value: None,
            required: false,
            min_length: None,
            max_length: None,
            pattern: None,
            options: None,
            description: None,
        }
    }

    /// The initial value this field renders with: the configured default,
    /// otherwise `false` for checkboxes and the empty string for everything else
    pub fn initial_value(&self) -> Value {
        match &self.default_value {
            Some(v) => v.clone(),
            None if self.field_type == FieldType::Checkbox => Value::Bool(false),
            None => Value::String(String::new()),
        }
    }
}

/// A named, ordered collection of field descriptors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    pub name: String,
    pub fields: Vec<FormField>,
}

/// One persisted instance of user-entered data for a definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    /// Field name -> submitted value, plus optional `<name>_sentiment` entries
    pub data: Map<String, Value>,
    /// RFC 3339 submission time
    pub timestamp: String,
    pub form_title: String,
}

/// Output of the external text-classification call
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Unknown,
    Error,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Unknown => "unknown",
            SentimentLabel::Error => "error",
        }
    }

    /// Parse a label returned by the scoring endpoint. Anything outside the
    /// three real classes plus the endpoint's own "unknown" maps to `Unknown`.
    pub fn from_endpoint(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "positive" => SentimentLabel::Positive,
            "negative" => SentimentLabel::Negative,
            "neutral" => SentimentLabel::Neutral,
            _ => SentimentLabel::Unknown,
        }
    }

    /// The string shown next to the field and persisted at submit time.
    /// Transport/application failure is surfaced as capitalized "Error",
    /// unlike the lowercase labels the endpoint itself produces.
    pub fn display(&self) -> &'static str {
        match self {
            SentimentLabel::Error => "Error",
            other => other.as_str(),
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_serialization() {
        let json = serde_json::to_string(&FieldType::SentimentText).unwrap();
        assert_eq!(json, "\"sentiment-text\"");

        let parsed: FieldType = serde_json::from_str("\"textarea\"").unwrap();
        assert_eq!(parsed, FieldType::Textarea);
    }

    #[test]
    fn test_field_type_from_str_rejects_unknown() {
        assert!("date".parse::<FieldType>().is_err());
        assert_eq!("radio".parse::<FieldType>().unwrap(), FieldType::Radio);
    }

    #[test]
    fn test_form_field_wire_shape() {
        let json = r#"{
            "name": "email",
            "label": "Email Address",
            "type": "email",
            "placeholder": "Enter your email",
            "required": true
        }"#;

        let field: FormField = serde_json::from_str(json).unwrap();
        assert_eq!(field.name, "email");
        assert_eq!(field.field_type, FieldType::Email);
        assert!(field.required);
        assert!(field.min_length.is_none());

        // Optional constraints stay absent on the wire
        let out = serde_json::to_value(&field).unwrap();
        assert!(out.get("minLength").is_none());
        assert_eq!(out["type"], "email");
    }

    #[test]
    fn test_initial_value_defaults() {
        let text = FormField::new("name", "Name", FieldType::Text);
        assert_eq!(text.initial_value(), Value::String(String::new()));

        let checkbox = FormField::new("agree", "Agree", FieldType::Checkbox);
        assert_eq!(checkbox.initial_value(), Value::Bool(false));

        let mut with_default = FormField::new("city", "City", FieldType::Text);
        with_default.default_value = Some(Value::String("Lisbon".into()));
        assert_eq!(with_default.initial_value(), Value::String("Lisbon".into()));
    }

    #[test]
    fn test_sentiment_label_from_endpoint() {
        assert_eq!(SentimentLabel::from_endpoint("Positive"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_endpoint(" neutral "), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_endpoint("joyful"), SentimentLabel::Unknown);
    }

    #[test]
    fn test_sentiment_label_display_split() {
        assert_eq!(SentimentLabel::Positive.display(), "positive");
        assert_eq!(SentimentLabel::Error.display(), "Error");
    }

    #[test]
    fn test_submission_record_wire_shape() {
        let mut data = Map::new();
        data.insert("name".to_string(), Value::String("Ana".into()));

        let record = SubmissionRecord {
            data,
            timestamp: "2025-01-01T00:00:00Z".to_string(),
            form_title: "Untitled Form".to_string(),
        };

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["formTitle"], "Untitled Form");
        assert_eq!(out["data"]["name"], "Ana");
    }
}
