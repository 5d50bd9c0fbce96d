//! Helpers for consuming streamed text responses.

use futures::StreamExt;
use tracing::debug;

use crate::error::CookbookError;
use crate::traits::TextStream;

/// Incremental UTF-8 decoder for byte chunks.
///
/// A multi-byte character split across two chunks is held back until the
/// rest of it arrives.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return all text that is complete so far.
    pub fn push(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        match std::str::from_utf8(&self.pending) {
            Ok(text) => {
                let text = text.to_string();
                self.pending.clear();
                text
            }
            Err(e) if e.error_len().is_none() => {
                let valid = e.valid_up_to();
                let text = String::from_utf8_lossy(&self.pending[..valid]).into_owned();
                self.pending.drain(..valid);
                text
            }
            Err(_) => {
                let text = String::from_utf8_lossy(&self.pending).into_owned();
                self.pending.clear();
                text
            }
        }
    }

    /// Flush whatever is left; a truncated character becomes U+FFFD.
    pub fn finish(&mut self) -> String {
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        text
    }
}

/// Accumulates text chunks into the complete response.
#[derive(Debug, Default)]
pub struct TextAccumulator {
    text: String,
    chunks: usize,
}

impl TextAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &str) {
        self.text.push_str(chunk);
        self.chunks += 1;
    }

    pub fn finish(self) -> String {
        self.text
    }

    /// Drain a whole stream, stopping at the first error.
    pub async fn collect(mut stream: TextStream) -> Result<String, CookbookError> {
        let mut acc = Self::new();
        while let Some(chunk) = stream.next().await {
            acc.push(&chunk?);
        }
        debug!(chunks = acc.chunks, bytes = acc.text.len(), "Response stream complete");
        Ok(acc.finish())
    }
}
