//! HTTP client for the OpenRouter chat-completions endpoint.
//!
//! One streaming request per invocation; every failure is terminal and
//! surfaced to the caller, never retried.

use crate::cli::Config;
use crate::error::Error;
use crate::stream::{forward, CompletionStream, StreamOutcome};
use crate::types::Message;
use futures::Stream;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::future::Future;
use std::io::Write;

/// Public OpenRouter API base URL.
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Client holding the HTTP connection pool and credential.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl Client {
    /// Create a client against the public OpenRouter endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        Self::with_base_url(api_key, OPENROUTER_BASE_URL)
    }

    /// Create a client against a custom base URL (useful for testing with
    /// mock servers).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .tcp_nodelay(true)
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Build request headers including bearer auth.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(auth) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            headers.insert(AUTHORIZATION, auth);
        }
        headers
    }

    fn stream_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Build the streaming request body.
    fn build_stream_body(model: &str, messages: &[Message]) -> Value {
        serde_json::json!({
            "model": model,
            "messages": messages,
            "stream": true,
        })
    }

    /// Open one streaming chat-completion request.
    pub async fn stream(
        &self,
        model: &str,
        messages: &[Message],
    ) -> Result<
        CompletionStream<impl Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Unpin>,
        Error,
    > {
        let body = Self::build_stream_body(model, messages);

        let response = self
            .http
            .post(self.stream_url())
            .headers(self.headers())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Ok(CompletionStream::new(Box::pin(response.bytes_stream())))
    }

    /// Map a non-success response to an error, extracting the server's
    /// `error.message` when the body carries one.
    async fn error_from_response(resp: reqwest::Response) -> Error {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();

        match status {
            401 => Error::Unauthorized,
            500..=599 => Error::Server(status),
            _ => {
                let message = serde_json::from_str::<Value>(&body)
                    .ok()
                    .and_then(|v| {
                        v["error"]["message"]
                            .as_str()
                            .map(std::string::ToString::to_string)
                    })
                    .unwrap_or(body);
                Error::api(status, message)
            }
        }
    }
}

/// Execute the full request: announce the model, open the stream, forward it.
///
/// The requested model goes to `status` so `out` stays clean for the answer.
/// Setup failures are folded into [`StreamOutcome::Failed`] so the caller
/// maps every ending to an exit code in one place.
pub async fn run<I>(
    client: &Client,
    config: &Config,
    interrupt: I,
    out: &mut impl Write,
    status: &mut impl Write,
) -> StreamOutcome
where
    I: Future<Output = ()>,
{
    let _ = writeln!(status, "Requesting model: {}", config.model);

    let messages = vec![Message::user(&config.question)];
    match client.stream(&config.model, &messages).await {
        Ok(stream) => forward(stream, interrupt, out, status).await,
        Err(e) => StreamOutcome::Failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_carry_bearer_auth() {
        let client = Client::new("test-key").unwrap();
        let headers = client.headers();

        let auth = headers.get("authorization").unwrap().to_str().unwrap();
        assert_eq!(auth, "Bearer test-key");
        assert_eq!(
            headers.get("content-type").unwrap().to_str().unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_stream_url() {
        let client = Client::with_base_url("k", "http://127.0.0.1:9").unwrap();
        assert_eq!(client.stream_url(), "http://127.0.0.1:9/chat/completions");
    }

    #[test]
    fn test_build_stream_body() {
        let messages = vec![
            Message::system("Be concise."),
            Message::user("What is Rust?"),
        ];
        let body = Client::build_stream_body("some/model", &messages);

        assert_eq!(body["model"], "some/model");
        assert!(body["stream"].as_bool().unwrap());
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "What is Rust?");
    }
}
