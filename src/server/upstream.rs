// Upstream language-model API forwarding (OpenAI-compatible chat completions)

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Client for the configured chat-completions API
pub struct Upstream {
    config: UpstreamConfig,
    client: reqwest::Client,
}

impl Upstream {
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// One chat round trip; returns the first choice's content
    pub async fn chat(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("Failed to reach upstream API: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(format!("Upstream API error ({}): {}", status, text));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse upstream response: {}", e))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| "Upstream API returned no content".to_string())
    }
}

/// Keyword fallback used when no upstream API is configured
pub fn heuristic_sentiment(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    if lower.contains("happy") || lower.contains("great") || lower.contains("excellent") {
        "positive"
    } else if lower.contains("sad") || lower.contains("bad") || lower.contains("terrible") {
        "negative"
    } else {
        "neutral"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristic_sentiment() {
        assert_eq!(heuristic_sentiment("What a GREAT day"), "positive");
        assert_eq!(heuristic_sentiment("this is terrible"), "negative");
        assert_eq!(heuristic_sentiment("the sky is blue"), "neutral");
    }

    #[test]
    fn test_chat_request_shape() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            max_tokens: 10,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["max_tokens"], 10);
    }
}
