use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::CookbookError;
use crate::message::ChatRequest;

/// A stream of text chunks making up one assistant answer.
pub type TextStream = BoxStream<'static, Result<String, CookbookError>>;

/// Anything that can answer a chat request with streamed text.
///
/// The recipe panel only depends on this seam, so the canned backend and an
/// HTTP client pointed at `/api/chat` are interchangeable.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Backend name used in logs and errors.
    fn name(&self) -> &str;

    /// Send the conversation and return the answer as a text stream.
    async fn stream_chat(&self, request: &ChatRequest) -> Result<TextStream, CookbookError>;
}
