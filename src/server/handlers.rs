// Function endpoint handlers

use super::upstream::heuristic_sentiment;
use super::ServerState;
use crate::models::{FormField, SentimentLabel};
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

const SENTIMENT_SYSTEM_PROMPT: &str = "You are a sentiment analysis expert. \
    Classify the following text as 'positive', 'negative', or 'neutral'. \
    Reply with the single word only.";

const GENERATE_SYSTEM_PROMPT: &str = "You design web forms. Given a description of a form, \
    reply with a JSON array of field objects with keys: name, label, type \
    (one of text, email, number, textarea, checkbox, select, radio, sentiment-text), \
    and optionally placeholder, required, minLength, maxLength, options \
    (array of {label, value}), description. Reply with the JSON array only.";

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateFieldsRequest {
    #[serde(default)]
    pub description: Option<String>,
}

fn error_body(message: &str) -> Json<Value> {
    Json(json!({ "error": message }))
}

/// `POST /functions/v1/analyze-sentiment`
///
/// Forwards the text to the upstream model when one is configured, otherwise
/// falls back to the keyword heuristic. The reply is normalized: anything the
/// model says outside the three classes comes back as "unknown".
pub async fn analyze_sentiment(
    State(state): State<ServerState>,
    Json(request): Json<AnalyzeRequest>,
) -> (StatusCode, Json<Value>) {
    let text = match request.text.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                error_body("Text input is required"),
            )
        }
    };

    let sentiment = match &state.upstream {
        Some(upstream) => {
            match upstream.chat(SENTIMENT_SYSTEM_PROMPT, &text, 10).await {
                Ok(reply) => SentimentLabel::from_endpoint(&reply).as_str(),
                Err(message) => {
                    log::error!("Sentiment forwarding failed: {}", message);
                    return (StatusCode::INTERNAL_SERVER_ERROR, error_body(&message));
                }
            }
        }
        None => heuristic_sentiment(&text),
    };

    (StatusCode::OK, Json(json!({ "sentiment": sentiment })))
}

/// `POST /functions/v1/generate-form-fields`
///
/// Requires a bearer token; asks the upstream model for a field list and
/// validates it against the descriptor shape before replying.
pub async fn generate_form_fields(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(request): Json<GenerateFieldsRequest>,
) -> (StatusCode, Json<Value>) {
    if bearer_token(&headers).is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            error_body("Missing or invalid authorization header"),
        );
    }

    let description = match request.description.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                error_body("A form description is required"),
            )
        }
    };

    let upstream = match &state.upstream {
        Some(u) => u,
        None => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("LLM_API_KEY not set"),
            )
        }
    };

    let reply = match upstream.chat(GENERATE_SYSTEM_PROMPT, &description, 2000).await {
        Ok(reply) => reply,
        Err(message) => {
            log::error!("Field generation failed: {}", message);
            return (StatusCode::INTERNAL_SERVER_ERROR, error_body(&message));
        }
    };

    match parse_field_list(&reply) {
        Ok(fields) => (StatusCode::OK, Json(json!({ "fields": fields }))),
        Err(message) => {
            log::error!("Unusable generation reply: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("The model did not return a valid array of form fields"),
            )
        }
    }
}

/// Extract a non-empty bearer token from the Authorization header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Parse the model reply into field descriptors, tolerating markdown fences
fn parse_field_list(reply: &str) -> Result<Vec<FormField>, String> {
    let stripped = strip_code_fence(reply);
    serde_json::from_str(stripped).map_err(|e| format!("Invalid field JSON: {}", e))
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}
