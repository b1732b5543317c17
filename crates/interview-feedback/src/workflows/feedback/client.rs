use crate::config::TextGenerationConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Outbound text-generation hook (e.g., a hosted LLM).
#[async_trait]
pub trait TextGenerationClient: Send + Sync {
    async fn generate_content(&self, prompt: &str) -> Result<String, TextGenerationError>;
}

/// Failure modes of a text-generation call.
#[derive(Debug, thiserror::Error)]
pub enum TextGenerationError {
    #[error("text generation is not configured")]
    NotConfigured,
    #[error("text generation transport failed: {0}")]
    Transport(reqwest::Error),
    #[error("text generation service returned {status}: {body}")]
    Service { status: u16, body: String },
    #[error("text generation response could not be decoded: {0}")]
    Decode(String),
    #[error("text generation response contained no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for TextGenerationError {
    /// Request URLs are stripped so endpoint details never reach logs.
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

/// Client that refuses every call, used when no credentials are configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledClient;

#[async_trait]
impl TextGenerationClient for DisabledClient {
    async fn generate_content(&self, _prompt: &str) -> Result<String, TextGenerationError> {
        Err(TextGenerationError::NotConfigured)
    }
}

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Adapter for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GeminiClient {
    pub fn new(config: &TextGenerationConfig) -> Result<Self, TextGenerationError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(TextGenerationError::NotConfigured)?;
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                config.base_url.trim_end_matches('/'),
                config.model
            ),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, prompt: &str) -> reqwest::RequestBuilder {
        self.http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GeminiRequest::from_prompt(prompt))
    }
}

#[async_trait]
impl TextGenerationClient for GeminiClient {
    async fn generate_content(&self, prompt: &str) -> Result<String, TextGenerationError> {
        let response = self.request(prompt).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TextGenerationError::Service {
                status: status.as_u16(),
                body,
            });
        }

        debug!(bytes = body.len(), "received text generation response");
        extract_text(&body)
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

impl GeminiRequest {
    fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

fn extract_text(body: &str) -> Result<String, TextGenerationError> {
    let response: GeminiResponse = serde_json::from_str(body)
        .map_err(|err| TextGenerationError::Decode(err.to_string()))?;

    response
        .candidates
        .into_iter()
        .next()
        .map(|candidate| {
            candidate
                .content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect::<String>()
        })
        .filter(|text| !text.trim().is_empty())
        .ok_or(TextGenerationError::EmptyResponse)
}
