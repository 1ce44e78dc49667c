// AI field-generation endpoint integration

use crate::models::FormField;
use serde::{Deserialize, Serialize};

/// Request body for the generation endpoint
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub description: String,
}

/// Success body returned by the generation endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, Deserialize)]
struct EndpointError {
    error: Option<String>,
}

/// Client for the field-generation endpoint
pub struct FieldGenerator {
    endpoint: String,
    client: reqwest::Client,
}

impl FieldGenerator {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    /// Generate field descriptors from a prose description of the form.
    ///
    /// The call is authenticated with a bearer token; a missing token or a
    /// blank description is rejected locally, before any network I/O.
    pub async fn generate_fields(
        &self,
        access_token: Option<&str>,
        description: &str,
    ) -> Result<Vec<FormField>, String> {
        if description.trim().is_empty() {
            return Err("A form description is required to generate fields".to_string());
        }
        let token = match access_token {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err("You must be logged in to generate fields".to_string()),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", token))
            .json(&GenerateRequest {
                description: description.to_string(),
            })
            .send()
            .await
            .map_err(|e| format!("Failed to reach generation endpoint: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<EndpointError>()
                .await
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| "Failed to generate form fields".to_string());
            log::warn!("Generation endpoint error ({}): {}", status, message);
            return Err(message);
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|_| "The service did not return a valid array of form fields".to_string())?;

        Ok(body.fields)
    }
}
