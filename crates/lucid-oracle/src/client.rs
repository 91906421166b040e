//! Ollama `/api/chat` client.

use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::OracleError;
use crate::history::{ChatMessage, History};
use crate::http::check_response;
use crate::oracle::{Oracle, Suggestion, parse_batch};
use crate::prompts::{self, NameRequest};

/// Connection and sampling settings for [`OllamaClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    /// Base URL, e.g. `http://localhost:11434`.
    pub host: String,
    pub model: String,
    pub timeout: Duration,
    pub temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

/// HTTP client for an Ollama-compatible chat endpoint.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    settings: ClientSettings,
}

impl OllamaClient {
    /// Build a client; every request is bounded by `settings.timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(settings: ClientSettings) -> Result<Self, OracleError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("lucid/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { http, settings })
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.settings.host.trim_end_matches('/'))
    }

    /// Send `messages` and return the assistant's reply content.
    ///
    /// With `json` set, Ollama constrains the reply to a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] if the request fails, times out, the server
    /// returns a non-success status, or the body is not a chat response.
    pub async fn chat(&self, messages: &[ChatMessage], json: bool) -> Result<String, OracleError> {
        let request = ChatRequest {
            model: &self.settings.model,
            messages,
            stream: false,
            format: json.then_some("json"),
            options: ChatOptions {
                temperature: self.settings.temperature,
            },
        };
        tracing::debug!(
            model = %self.settings.model,
            messages = messages.len(),
            json,
            "oracle request"
        );
        let resp = self.http.post(self.chat_url()).json(&request).send().await?;
        let resp = check_response(resp).await?;
        let body = resp.text().await?;
        let data: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| OracleError::Parse(format!("unexpected chat response: {e}")))?;
        Ok(data.message.content)
    }
}

#[async_trait]
impl Oracle for OllamaClient {
    async fn summarize(&self, code: &str) -> Result<String, OracleError> {
        let messages = [ChatMessage::user(prompts::summary_prompt(code))];
        Ok(self.chat(&messages, false).await?.trim().to_string())
    }

    async fn suggest(
        &self,
        history: &History,
        request: &NameRequest,
    ) -> Result<Suggestion, OracleError> {
        let messages = history.with(ChatMessage::user(prompts::new_name_prompt(request)));
        let content = self.chat(&messages, true).await?;
        Suggestion::from_content(&content)
    }

    async fn suggest_batch(
        &self,
        history: &History,
        function: &str,
        requests: &[NameRequest],
    ) -> Result<IndexMap<String, String>, OracleError> {
        let messages = history.with(ChatMessage::user(prompts::batch_prompt(function, requests)));
        let content = self.chat(&messages, true).await?;
        parse_batch(&content)
    }
}
