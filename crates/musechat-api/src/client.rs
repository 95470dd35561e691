use async_trait::async_trait;
use futures_util::StreamExt;

use musechat_logging::{log_request, log_request_to_file, log_response, log_stream_chunk};
use musechat_models::{ApiErrorBody, ApiMessage, ChatRequest, ChatResponse, StreamChunk, Usage};

use crate::error::ApiError;

/// Default OpenRouter API base URL
pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1";

/// Sampling parameters sent with every completion request
pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 2048;

/// Result of one completion call
#[derive(Debug, Clone)]
pub struct Completion {
    pub content: String,
    pub usage: Option<Usage>,
}

/// The seam between the state manager and the remote completion endpoint
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Issue a single non-streaming completion request. One attempt per
    /// call; retry policy is the caller's responsibility.
    async fn complete(&self, messages: &[ApiMessage], model: &str)
        -> Result<Completion, ApiError>;

    /// Streaming variant: invokes `on_chunk` once per received text
    /// fragment and returns the accumulated content.
    async fn complete_streaming(
        &self,
        _messages: &[ApiMessage],
        _model: &str,
        _on_chunk: Box<dyn for<'a> FnMut(&'a str) + Send>,
    ) -> Result<Completion, ApiError> {
        Err(ApiError::StreamingUnsupported)
    }
}

/// Client for the OpenRouter chat-completions endpoint
pub struct OpenRouterClient {
    api_key: String,
    base_url: String,
    referer: Option<String>,
    app_title: Option<String>,
    verbose: bool,
    client: reqwest::Client,
}

impl OpenRouterClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, OPENROUTER_API_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        // Ensure base_url doesn't end with a slash
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            api_key,
            base_url,
            referer: None,
            app_title: None,
            verbose: false,
            client: reqwest::Client::new(),
        }
    }

    /// Set the HTTP-Referer header sent with each request
    pub fn referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// Set the X-Title header sent with each request
    pub fn app_title(mut self, title: impl Into<String>) -> Self {
        self.app_title = Some(title.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request(&self, messages: &[ApiMessage], model: &str, stream: bool) -> ChatRequest {
        ChatRequest {
            model: model.to_string(),
            messages: messages.to_vec(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream,
        }
    }

    /// POST the request; non-2xx responses are mapped to `ApiError::Http`
    /// with the server-provided message when the body carries one.
    async fn post(&self, request: &ChatRequest) -> Result<reqwest::Response, ApiError> {
        let url = self.completions_url();

        log_request(&url, request, &self.api_key, self.verbose);
        // File logging is best-effort
        let _ = log_request_to_file(&url, request, &request.model, &self.api_key);

        let mut builder = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json");
        if let Some(referer) = &self.referer {
            builder = builder.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.app_title {
            builder = builder.header("X-Title", title);
        }

        let response = builder.json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log_response(status.as_u16(), &body, self.verbose);

            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(
        &self,
        messages: &[ApiMessage],
        model: &str,
    ) -> Result<Completion, ApiError> {
        let request = self.build_request(messages, model, false);
        let response = self.post(&request).await?;

        let status = response.status();
        let body = response.text().await?;
        log_response(status.as_u16(), &body, self.verbose);

        let chat_response: ChatResponse = serde_json::from_str(&body)?;
        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or(ApiError::NoChoices)?;

        Ok(Completion {
            content: choice.message.content,
            usage: chat_response.usage,
        })
    }

    async fn complete_streaming(
        &self,
        messages: &[ApiMessage],
        model: &str,
        mut on_chunk: Box<dyn for<'a> FnMut(&'a str) + Send>,
    ) -> Result<Completion, ApiError> {
        let request = self.build_request(messages, model, true);
        let response = self.post(&request).await?;

        let mut accumulated = String::new();
        let mut usage: Option<Usage> = None;
        let mut buffer = String::new();
        let mut chunk_counter = 0usize;

        let mut stream = response.bytes_stream();
        'outer: while let Some(bytes) = stream.next().await {
            let bytes = bytes?;
            buffer.push_str(&String::from_utf8_lossy(&bytes));

            // Process complete SSE lines ("data: {json}")
            while let Some(line_end) = buffer.find('\n') {
                let line = buffer[..line_end].trim().to_string();
                buffer.drain(..=line_end);

                let Some(data) = line.strip_prefix("data: ") else {
                    continue;
                };

                chunk_counter += 1;
                log_stream_chunk(chunk_counter, data, self.verbose);

                // Stream end marker
                if data.trim() == "[DONE]" {
                    break 'outer;
                }

                // Malformed fragments are skipped
                if let Some((delta, chunk_usage)) = parse_stream_data(data) {
                    if chunk_usage.is_some() {
                        usage = chunk_usage;
                    }
                    if let Some(text) = delta {
                        accumulated.push_str(&text);
                        on_chunk(&text);
                    }
                }
            }
        }

        Ok(Completion {
            content: accumulated,
            usage,
        })
    }
}

/// Parse one SSE data payload into its text delta and usage, if any.
/// Returns `None` for fragments that do not parse as a stream chunk.
fn parse_stream_data(data: &str) -> Option<(Option<String>, Option<Usage>)> {
    let chunk: StreamChunk = serde_json::from_str(data).ok()?;
    let delta = chunk.choices.first().and_then(|c| c.delta.content.clone());
    Some((delta, chunk.usage))
}
