//! Stream one chat completion from OpenRouter to the terminal.
//!
//! # Example
//! ```no_run
//! use ask::{Client, Message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ask::Error> {
//!     let client = Client::new("sk-or-...")?;
//!     let messages = vec![Message::user("What is the meaning of life?")];
//!
//!     let mut stream = client
//!         .stream("qwen/qwen3-30b-a3b-thinking-2507", &messages)
//!         .await?;
//!
//!     while let Some(chunk) = stream.next().await {
//!         if let Some(text) = chunk?.text() {
//!             print!("{text}");
//!         }
//!     }
//!     println!();
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod error;
pub mod sse;
pub mod stream;
pub mod types;

pub use cli::{Cli, Config};
pub use client::Client;
pub use error::Error;
pub use stream::{CompletionStream, StreamOutcome};
pub use types::{Message, Role, StreamChunk};

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
