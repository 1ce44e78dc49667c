// Sentiment scoring endpoint integration

use crate::models::SentimentLabel;
use serde::{Deserialize, Serialize};

/// Request body for the scoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyRequest {
    pub text: String,
}

/// Success body returned by the scoring endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyResponse {
    pub sentiment: String,
}

/// Error body returned by the scoring endpoint
#[derive(Debug, Clone, Deserialize)]
struct EndpointError {
    error: Option<String>,
}

/// Client for the external text-classification endpoint
pub struct SentimentClient {
    endpoint: String,
    client: reqwest::Client,
}

impl SentimentClient {
    /// Create a new client for the given endpoint URL
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    /// Classify free text as one sentiment label.
    ///
    /// A 2xx reply yields the endpoint's own label, with anything outside the
    /// recognized set mapped to `Unknown`. Transport failures, non-2xx replies
    /// and unparseable bodies are returned as `Err` with the server-provided
    /// message when available; callers surface those as the `Error` label.
    ///
    /// One round trip, no timeout, no retry; dropping the future is the only
    /// form of cancellation.
    pub async fn classify(&self, text: &str) -> Result<SentimentLabel, String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ClassifyRequest {
                text: text.to_string(),
            })
            .send()
            .await
            .map_err(|e| format!("Failed to reach sentiment endpoint: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<EndpointError>()
                .await
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| "no error message".to_string());
            log::warn!("Sentiment endpoint error ({}): {}", status, message);
            return Err(format!("Sentiment endpoint error ({}): {}", status, message));
        }

        let body: ClassifyResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse sentiment response: {}", e))?;

        Ok(SentimentLabel::from_endpoint(&body.sentiment))
    }
}
