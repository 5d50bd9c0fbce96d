//! Mock chat endpoint (`POST /api/chat`).
//!
//! Takes the same JSON request a real model proxy would, throws it away, and
//! streams back the canned recipe as a single chunk. The body is drained
//! without buffering, so no request size limit applies.

use std::convert::Infallible;

use axum::{
    body::{Body, Bytes},
    http::header,
    response::IntoResponse,
};
use futures::StreamExt;
use tracing::{debug, instrument, warn};

use cookbook_core::CheatBackend;

/// Handler for `POST /api/chat`.
#[instrument(skip_all)]
pub async fn chat(body: Body) -> impl IntoResponse {
    let discarded = drain(body).await;
    debug!(discarded, "Discarded chat request body");

    let stream = CheatBackend::recipe_stream()
        .map(|chunk| Ok::<_, Infallible>(Bytes::from_static(chunk.as_bytes())));

    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(stream),
    )
}

/// Read the body to the end and return how many bytes it had.
async fn drain(body: Body) -> usize {
    let mut data = body.into_data_stream();
    let mut total = 0;
    while let Some(chunk) = data.next().await {
        match chunk {
            Ok(chunk) => total += chunk.len(),
            Err(e) => {
                warn!(error = %e, "Chat request body ended early");
                break;
            }
        }
    }
    total
}
