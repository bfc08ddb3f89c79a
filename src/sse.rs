//! Incremental SSE (Server-Sent Events) parser.
//!
//! Handles:
//! - Partial frames across TCP chunks
//! - Multi-line data fields
//! - CRLF and LF line endings
//! - Comment lines and unknown fields
//! - Buffer compaction to prevent unbounded growth

use bytes::{Buf, BytesMut};
use memchr::memchr;

/// Line-based SSE parser yielding the `data` payload of each event.
///
/// The chat-completions stream only ever carries `data:` fields, so other
/// fields (`event:`, `id:`, `retry:`) are consumed and dropped.
pub struct SseParser {
    buffer: BytesMut,
    /// Offset of unconsumed data in buffer.
    consumed: usize,
}

impl SseParser {
    /// Create a new parser with default buffer capacity.
    pub fn new() -> Self {
        Self::with_capacity(8192)
    }

    /// Create a new parser with specified initial capacity.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(cap),
            consumed: 0,
        }
    }

    /// Feed bytes into the parser.
    #[inline]
    pub fn feed(&mut self, data: &[u8]) {
        // Compact buffer if we've consumed more than half
        if self.consumed > self.buffer.len() / 2 && self.consumed > 4096 {
            self.compact();
        }
        self.buffer.extend_from_slice(data);
    }

    /// Compact buffer by removing consumed bytes.
    fn compact(&mut self) {
        if self.consumed > 0 {
            self.buffer.advance(self.consumed);
            self.consumed = 0;
        }
    }

    /// Data payload of the next complete event.
    ///
    /// Returns `None` when more bytes are needed. Events without a `data`
    /// field are skipped.
    pub fn next_data(&mut self) -> Option<String> {
        'event: loop {
            let buf = &self.buffer[self.consumed..];
            let mut data = String::new();
            let mut saw_data = false;
            let mut pos = 0;

            loop {
                let line_end = match memchr(b'\n', &buf[pos..]) {
                    Some(i) => pos + i,
                    None => return None, // partial event, wait for more bytes
                };

                let mut line = &buf[pos..line_end];
                if line.ends_with(b"\r") {
                    line = &line[..line.len() - 1];
                }
                pos = line_end + 1;

                // Blank line terminates the event
                if line.is_empty() {
                    self.consumed += pos;
                    if saw_data {
                        return Some(data);
                    }
                    continue 'event;
                }

                // Lines starting with ':' are comments
                if line[0] == b':' {
                    continue;
                }

                let (field, value) = match memchr(b':', line) {
                    Some(colon) => {
                        // Value starts after the colon, minus one optional space
                        let mut value = &line[colon + 1..];
                        if value.first() == Some(&b' ') {
                            value = &value[1..];
                        }
                        (&line[..colon], value)
                    }
                    None => (line, &line[..0]),
                };

                if field == b"data" {
                    // SSE spec requires UTF-8
                    if let Ok(value) = std::str::from_utf8(value) {
                        if saw_data {
                            data.push('\n');
                        }
                        data.push_str(value);
                        saw_data = true;
                    }
                }
            }
        }
    }
}

impl Default for SseParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_event() {
        let mut parser = SseParser::new();
        parser.feed(b"data: hello world\n\n");

        assert_eq!(parser.next_data().unwrap(), "hello world");
        assert!(parser.next_data().is_none());
    }

    #[test]
    fn test_multiline_data() {
        let mut parser = SseParser::new();
        parser.feed(b"data: line1\ndata: line2\ndata: line3\n\n");

        assert_eq!(parser.next_data().unwrap(), "line1\nline2\nline3");
    }

    #[test]
    fn test_crlf() {
        let mut parser = SseParser::new();
        parser.feed(b"data: hello\r\n\r\n");

        assert_eq!(parser.next_data().unwrap(), "hello");
    }

    #[test]
    fn test_partial_event() {
        let mut parser = SseParser::new();
        parser.feed(b"data: hel");
        assert!(parser.next_data().is_none());

        parser.feed(b"lo\n\n");
        assert_eq!(parser.next_data().unwrap(), "hello");
    }

    #[test]
    fn test_coalesced_frames() {
        let mut parser = SseParser::new();
        // Multiple events in one TCP frame
        parser.feed(b"data: a\n\ndata: b\n\ndata: c\n\n");

        assert_eq!(parser.next_data().unwrap(), "a");
        assert_eq!(parser.next_data().unwrap(), "b");
        assert_eq!(parser.next_data().unwrap(), "c");
        assert!(parser.next_data().is_none());
    }

    #[test]
    fn test_comments_and_other_fields_skipped() {
        let mut parser = SseParser::new();
        parser.feed(b": keepalive\n\nevent: message\nid: 7\ndata: payload\n\n");

        assert_eq!(parser.next_data().unwrap(), "payload");
    }

    #[test]
    fn test_no_space_after_colon() {
        let mut parser = SseParser::new();
        parser.feed(b"data:tight\n\n");

        assert_eq!(parser.next_data().unwrap(), "tight");
    }

    #[test]
    fn test_json_data() {
        let mut parser = SseParser::new();
        parser.feed(b"data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n\n");

        let data = parser.next_data().unwrap();
        assert!(data.starts_with('{'));
        assert!(data.ends_with('}'));
    }
}
