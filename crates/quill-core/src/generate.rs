//! Content generation
//!
//! Thin wrapper around an OpenAI-style chat-completion API. The caller
//! supplies a prompt and gets text back; nothing here touches the stores.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// Request timeout in seconds
const REQUEST_TIMEOUT: u64 = 10;

/// System prompt sent with every request
const SYSTEM_PROMPT: &str = "You are a professional content creator and editor. \
    Provide clear, concise, and helpful suggestions.";

/// Errors from the generation API
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Caller passed an empty prompt
    #[error("prompt is required")]
    EmptyPrompt,

    /// No API key configured
    #[error("no generation API key configured; set generation_api_key or QUILL_GENERATION_API_KEY")]
    MissingApiKey,

    /// The API rejected our credentials
    #[error("invalid API key; check your generation API key configuration")]
    Auth,

    /// The API answered with an unexpected status
    #[error("generation API returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// The API answered successfully but produced no content
    #[error("no content generated; try again")]
    Empty,

    /// The API could not be reached (includes timeouts)
    #[error("failed to reach generation API: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Client for the generation API
pub struct Generator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl Generator {
    /// Build a generator from configuration.
    ///
    /// Errors with `MissingApiKey` if no key is configured.
    pub fn from_config(config: &Config) -> Result<Self, GenerateError> {
        let api_key = config
            .generation_api_key
            .clone()
            .ok_or(GenerateError::MissingApiKey)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT))
            .user_agent(concat!("quill/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.generation_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.generation_model.clone(),
        })
    }

    /// Generate text for the given prompt
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        if prompt.trim().is_empty() {
            return Err(GenerateError::EmptyPrompt);
        }

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: 0.7,
            max_tokens: 1000,
        };

        debug!(model = %self.model, "requesting generation");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(GenerateError::Auth);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(GenerateError::Empty)?;

        Ok(content)
    }
}
