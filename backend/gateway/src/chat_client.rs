//! HTTP client side of the chat seam.
//!
//! Posts the conversation as JSON and exposes the response body as a text
//! stream, decoding UTF-8 across chunk boundaries.

use std::fmt::Display;

use async_trait::async_trait;
use futures::{Stream, StreamExt, future, stream};
use tracing::debug;

use cookbook_core::{ChatBackend, ChatRequest, CookbookError, TextStream, Utf8Decoder};

/// Chat backend that talks to a `/api/chat`-style endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpChatBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn error(&self, message: impl Display) -> CookbookError {
        CookbookError::Backend {
            backend: self.name().to_string(),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn stream_chat(&self, request: &ChatRequest) -> Result<TextStream, CookbookError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.error(format!("endpoint returned {status}")));
        }

        debug!(endpoint = %self.endpoint, %status, "Chat response stream opened");
        Ok(decode_text_stream(response.bytes_stream()))
    }
}

/// Turn a byte stream into a text stream. Empty chunks are dropped.
pub fn decode_text_stream<S, B, E>(body: S) -> TextStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let body = Box::pin(body);
    stream::unfold(Some((body, Utf8Decoder::new())), |state| async move {
        let (mut body, mut decoder) = state?;
        match body.next().await {
            Some(Ok(bytes)) => {
                let text = decoder.push(bytes.as_ref());
                Some((Ok(text), Some((body, decoder))))
            }
            Some(Err(e)) => Some((Err(CookbookError::Stream(e.to_string())), None)),
            None => Some((Ok(decoder.finish()), None)),
        }
    })
    .filter(|chunk| future::ready(!matches!(chunk, Ok(text) if text.is_empty())))
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookbook_core::{CHEAT_RECIPE, ChatMessage, TextAccumulator};

    use crate::server::test_support::spawn_test_server;

    #[tokio::test]
    async fn test_decode_rejoins_split_characters() {
        let bytes = "rainbow’s end".as_bytes().to_vec();
        let (head, tail) = bytes.split_at(8);
        let chunks = vec![
            Ok::<_, std::io::Error>(head.to_vec()),
            Ok(Vec::new()),
            Ok(tail.to_vec()),
        ];
        let text = TextAccumulator::collect(decode_text_stream(stream::iter(chunks)))
            .await
            .unwrap();
        assert_eq!(text, "rainbow’s end");
    }

    #[tokio::test]
    async fn test_decode_surfaces_transport_errors() {
        let chunks = vec![
            Ok(b"partial".to_vec()),
            Err(std::io::Error::other("connection reset")),
        ];
        let result = TextAccumulator::collect(decode_text_stream(stream::iter(chunks))).await;
        assert!(matches!(result, Err(CookbookError::Stream(msg)) if msg.contains("reset")));
    }

    #[tokio::test]
    async fn test_streams_mock_endpoint() {
        let server = spawn_test_server().await;
        let backend = HttpChatBackend::new(server.url("/api/chat"));
        let request = ChatRequest {
            messages: vec![ChatMessage::user("salt, pepper")],
        };
        let chunks: Vec<_> = backend.stream_chat(&request).await.unwrap().collect().await;
        let text: String = chunks.into_iter().map(|c| c.unwrap()).collect();
        assert_eq!(text, CHEAT_RECIPE);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_backend_error() {
        let backend = HttpChatBackend::new("http://127.0.0.1:9/api/chat");
        let request = ChatRequest { messages: vec![] };
        assert!(matches!(
            backend.stream_chat(&request).await,
            Err(CookbookError::Backend { .. })
        ));
    }

    #[tokio::test]
    async fn test_error_status_is_backend_error() {
        let server = spawn_test_server().await;
        let backend = HttpChatBackend::new(server.url("/api/no-such-route"));
        let request = ChatRequest { messages: vec![] };
        let err = backend.stream_chat(&request).await.err().unwrap();
        assert!(err.to_string().contains("404"));
    }
}
