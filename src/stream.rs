//! Streaming response handling: chunk decoding and terminal forwarding.

use crate::error::Error;
use crate::sse::SseParser;
use crate::types::StreamChunk;
use bytes::Bytes;
use futures::Stream;
use serde::Deserialize;
use std::future::Future;
use std::io::Write;

/// End-of-stream marker on the chat-completions SSE feed.
const DONE_MARKER: &str = "[DONE]";

/// A streaming completion response, yielding decoded chunks in arrival order.
pub struct CompletionStream<S> {
    inner: S,
    parser: SseParser,
    done: bool,
}

impl<S> CompletionStream<S>
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Unpin,
{
    /// Create a completion stream over a raw byte stream.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            parser: SseParser::new(),
            done: false,
        }
    }

    /// Get the next chunk, or `None` once the stream is exhausted.
    pub async fn next(&mut self) -> Option<Result<StreamChunk, Error>> {
        use futures::StreamExt;

        if self.done {
            return None;
        }

        loop {
            // First, try to decode an event from buffered data
            if let Some(data) = self.parser.next_data() {
                if data == DONE_MARKER {
                    self.done = true;
                    return None;
                }
                return Some(parse_chunk(&data));
            }

            // Need more bytes from the transport
            match self.inner.next().await {
                Some(Ok(bytes)) => self.parser.feed(&bytes),
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(Error::Http(e)));
                }
                None => {
                    // Transport ended - drain any complete buffered event
                    self.done = true;
                    if let Some(data) = self.parser.next_data() {
                        if data != DONE_MARKER {
                            return Some(parse_chunk(&data));
                        }
                    }
                    return None;
                }
            }
        }
    }
}

/// Decode one SSE data payload into a chunk.
fn parse_chunk(data: &str) -> Result<StreamChunk, Error> {
    let wire: WireChunk = serde_json::from_str(data).map_err(|e| Error::parse(e.to_string()))?;
    let delta = wire
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content);
    Ok(StreamChunk {
        model: wire.model,
        delta,
    })
}

// --- Serde types for the chat-completions stream ---

#[derive(Debug, Deserialize)]
struct WireChunk {
    model: Option<String>,
    #[serde(default)]
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    #[serde(default)]
    delta: WireDelta,
}

#[derive(Debug, Deserialize, Default)]
struct WireDelta {
    content: Option<String>,
}

/// How a forwarded stream ended. The caller maps this to an exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    /// Stream exhausted normally.
    Completed,
    /// The interrupt future fired mid-stream.
    Interrupted,
    /// Request or stream failure, with the display message.
    Failed(String),
}

/// Forward a completion stream to `out`, reporting status lines on `status`.
///
/// Each text delta is written to `out` as it arrives and flushed so partial
/// output is visible immediately. The first chunk carrying a server-declared
/// model produces exactly one `Serving model:` line on `status`. Normal
/// exhaustion writes one trailing newline to `out`; an interrupt writes
/// `\nInterrupted.` there instead, taking effect at the next suspension
/// point in the loop.
pub async fn forward<S, I>(
    mut stream: CompletionStream<S>,
    interrupt: I,
    out: &mut impl Write,
    status: &mut impl Write,
) -> StreamOutcome
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Unpin,
    I: Future<Output = ()>,
{
    tokio::pin!(interrupt);
    let mut served_reported = false;

    loop {
        let chunk = tokio::select! {
            () = &mut interrupt => {
                let _ = writeln!(out, "\nInterrupted.");
                return StreamOutcome::Interrupted;
            }
            chunk = stream.next() => chunk,
        };

        match chunk {
            Some(Ok(chunk)) => {
                if !served_reported {
                    if let Some(served) = &chunk.model {
                        let _ = writeln!(status, "Serving model: {served}");
                        served_reported = true;
                    }
                }
                if let Some(text) = chunk.text() {
                    let _ = write!(out, "{text}");
                    let _ = out.flush();
                }
            }
            Some(Err(e)) => return StreamOutcome::Failed(e.to_string()),
            None => {
                let _ = writeln!(out);
                return StreamOutcome::Completed;
            }
        }
    }
}
