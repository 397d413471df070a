//! Book summary generation through an OpenAI-compatible chat-completions API

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    config::SummaryConfig,
    error::{AppError, AppResult},
};

const SYSTEM_PROMPT: &str = "You are a helpful assistant that summarizes books.";

/// Why a summary could not be produced
#[derive(Debug, Error, PartialEq)]
pub enum SummaryError {
    #[error("summary provider API key is not configured")]
    NotConfigured,

    #[error("summary request timed out")]
    Timeout,

    #[error("summary provider rate limit reached")]
    RateLimited,

    #[error("summary provider returned HTTP {0}")]
    Provider(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("provider returned an empty summary")]
    EmptyContent,
}

impl SummaryError {
    /// Timeouts, rate limits, connection failures and provider 5xx are worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            SummaryError::Timeout | SummaryError::RateLimited | SummaryError::Transport(_) => true,
            SummaryError::Provider(status) => *status >= 500,
            SummaryError::NotConfigured | SummaryError::InvalidResponse(_) | SummaryError::EmptyContent => false,
        }
    }
}

impl From<reqwest::Error> for SummaryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SummaryError::Timeout
        } else if e.is_decode() {
            SummaryError::InvalidResponse(e.to_string())
        } else {
            SummaryError::Transport(e.to_string())
        }
    }
}

/// Produces a short summary for a book
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    async fn generate(&self, isbn: &str, title: &str) -> Result<String, SummaryError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn user_prompt(isbn: &str, title: &str) -> String {
    format!(
        "Write a concise 2-line summary of the book with the following details:\n\nTitle: {}\nISBN: {}",
        title, isbn
    )
}

fn build_request(config: &SummaryConfig, isbn: &str, title: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: config.model.clone(),
        temperature: config.temperature,
        max_tokens: config.max_tokens,
        messages: vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user",
                content: user_prompt(isbn, title),
            },
        ],
    }
}

/// First choice's content, trimmed. Missing or blank content is an error.
fn extract_summary(response: ChatCompletionResponse) -> Result<String, SummaryError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| SummaryError::InvalidResponse("no choices returned".to_string()))?;

    match choice.message.content.map(|c| c.trim().to_string()) {
        Some(content) if !content.is_empty() => Ok(content),
        _ => Err(SummaryError::EmptyContent),
    }
}

/// Run `attempt` until it succeeds, fails terminally, or `max_retries` extra
/// attempts are spent. The delay doubles after every retry.
async fn with_retries<F, Fut>(max_retries: u32, backoff: Duration, mut attempt: F) -> Result<String, SummaryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, SummaryError>>,
{
    let mut delay = backoff;
    let mut tries = 0;

    loop {
        match attempt().await {
            Ok(summary) => return Ok(summary),
            Err(e) if e.is_retryable() && tries < max_retries => {
                tries += 1;
                tracing::warn!(
                    "Summary attempt {} failed ({}), retrying in {:?}",
                    tries,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Chat-completions client shared by every request
#[derive(Clone)]
pub struct OpenAiSummaryGenerator {
    client: Client,
    config: SummaryConfig,
}

impl OpenAiSummaryGenerator {
    pub fn new(config: SummaryConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    async fn request_once(&self, isbn: &str, title: &str) -> Result<String, SummaryError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(SummaryError::NotConfigured)?;

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&build_request(&self.config, isbn, title))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SummaryError::RateLimited);
        }
        if !status.is_success() {
            return Err(SummaryError::Provider(status.as_u16()));
        }

        let body: ChatCompletionResponse = response.json().await?;
        tracing::debug!("Summary provider returned {} choice(s) for {}", body.choices.len(), isbn);
        extract_summary(body)
    }
}

#[async_trait]
impl SummaryGenerator for OpenAiSummaryGenerator {
    async fn generate(&self, isbn: &str, title: &str) -> Result<String, SummaryError> {
        with_retries(
            self.config.max_retries,
            Duration::from_millis(self.config.retry_backoff_ms),
            move || self.request_once(isbn, title),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode as HttpStatus, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    };

    fn completion(content: Value) -> Value {
        json!({ "choices": [ { "index": 0, "message": { "role": "assistant", "content": content } } ] })
    }

    /// Serve `router` on an ephemeral port and return its base URL
    async fn spawn_provider(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn config_for(base_url: String) -> SummaryConfig {
        SummaryConfig {
            base_url,
            api_key: Some("test-key".to_string()),
            retry_backoff_ms: 1,
            ..SummaryConfig::default()
        }
    }

    #[test]
    fn request_carries_both_prompts() {
        let request = build_request(&SummaryConfig::default(), "9780441013593", "Dune");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 70);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], SYSTEM_PROMPT);
        assert_eq!(json["messages"][1]["role"], "user");
        let user = json["messages"][1]["content"].as_str().unwrap();
        assert!(user.contains("Title: Dune\nISBN: 9780441013593"));
    }

    #[test]
    fn blank_or_missing_content_is_an_error() {
        let blank: ChatCompletionResponse = serde_json::from_value(completion(json!("   "))).unwrap();
        assert_eq!(extract_summary(blank), Err(SummaryError::EmptyContent));

        let null: ChatCompletionResponse = serde_json::from_value(completion(Value::Null)).unwrap();
        assert_eq!(extract_summary(null), Err(SummaryError::EmptyContent));

        let none: ChatCompletionResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert!(matches!(extract_summary(none), Err(SummaryError::InvalidResponse(_))));
    }

    #[test]
    fn retry_classification() {
        assert!(SummaryError::Timeout.is_retryable());
        assert!(SummaryError::RateLimited.is_retryable());
        assert!(SummaryError::Provider(503).is_retryable());
        assert!(!SummaryError::Provider(401).is_retryable());
        assert!(!SummaryError::EmptyContent.is_retryable());
        assert!(!SummaryError::NotConfigured.is_retryable());
    }

    #[tokio::test]
    async fn retries_stop_at_the_limit() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = with_retries(2, Duration::from_millis(1), move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(SummaryError::RateLimited)
        })
        .await;

        assert_eq!(result, Err(SummaryError::RateLimited));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn terminal_errors_are_not_retried() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = with_retries(5, Duration::from_millis(1), move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(SummaryError::EmptyContent)
        })
        .await;

        assert_eq!(result, Err(SummaryError::EmptyContent));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn generates_summary_from_provider() {
        let router = Router::new().route(
            "/chat/completions",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["temperature"].as_f64().map(|t| (t * 10.0).round()), Some(7.0));
                Json(completion(json!("  A desert planet. A messiah.  ")))
            }),
        );
        let generator = OpenAiSummaryGenerator::new(config_for(spawn_provider(router).await)).unwrap();

        let summary = generator.generate("9780441013593", "Dune").await.unwrap();
        assert_eq!(summary, "A desert planet. A messiah.");
    }

    #[tokio::test]
    async fn rate_limited_request_is_retried() {
        let hits = Arc::new(AtomicU32::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/chat/completions",
            post(move || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(HttpStatus::TOO_MANY_REQUESTS)
                    } else {
                        Ok(Json(completion(json!("Second time lucky."))))
                    }
                }
            }),
        );
        let generator = OpenAiSummaryGenerator::new(config_for(spawn_provider(router).await)).unwrap();

        let summary = generator.generate("1", "Title").await.unwrap();
        assert_eq!(summary, "Second time lucky.");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn client_errors_surface_without_retry() {
        let hits = Arc::new(AtomicU32::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/chat/completions",
            post(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { HttpStatus::UNAUTHORIZED }
            }),
        );
        let generator = OpenAiSummaryGenerator::new(config_for(spawn_provider(router).await)).unwrap();

        let err = generator.generate("1", "Title").await.unwrap_err();
        assert_eq!(err, SummaryError::Provider(401));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_api_key_fails_fast() {
        let generator = OpenAiSummaryGenerator::new(SummaryConfig::default()).unwrap();
        let err = generator.generate("1", "Title").await.unwrap_err();
        assert_eq!(err, SummaryError::NotConfigured);
    }
}
