use thiserror::Error;

/// Unified error type for the OpenRouter client.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or missing API key (401 from the server).
    #[error("unauthorized: check OPENROUTER_API_KEY")]
    Unauthorized,

    /// Server error (5xx status codes).
    #[error("server error ({0})")]
    Server(u16),

    /// API error with a server-reported message.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// JSON or SSE parsing error.
    #[error("parse: {0}")]
    Parse(String),

    /// HTTP/network error.
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid client configuration.
    #[error("config: {0}")]
    Config(String),
}

impl Error {
    /// Create an API error from status and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
