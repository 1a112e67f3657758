//! Chat-completion client used by `POST /api/generate`.
//!
//! One blocking call per generation request: no retry, no streaming, no local timeout
//! beyond the HTTP client's defaults.

use super::ClientError;
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

/// Model used for every generation request.
pub const MODEL: &str = "gpt-4o-mini";

/// Low randomness: the output has to be a parseable JSON object.
pub const TEMPERATURE: f32 = 0.2;

/// The two conversation turns sent to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub instruction: String,
    pub follow_up: String,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the text of the first choice, `None` if the API sent no content.
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, ClientError>;
}

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(http: reqwest::Client, api_key: String, base_url: String) -> Self {
        Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn chat_request(request: &CompletionRequest) -> ChatRequest<'_> {
    ChatRequest {
        model: MODEL,
        messages: [
            ChatMessage {
                role: "system",
                content: &request.instruction,
            },
            ChatMessage {
                role: "user",
                content: &request.follow_up,
            },
        ],
        response_format: ResponseFormat {
            kind: "json_object",
        },
        temperature: TEMPERATURE,
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, ClientError> {
        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&chat_request(request))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        let body: ChatResponse = response.json().await?;
        debug!("completion returned {} choice(s)", body.choices.len());
        Ok(body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}
