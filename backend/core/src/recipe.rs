//! The canned "furious chef" recipe served instead of a real model answer.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tracing::debug;

use crate::error::CookbookError;
use crate::message::ChatRequest;
use crate::traits::{ChatBackend, TextStream};

/// The fixed answer. Ingredients never influence it.
pub const CHEAT_RECIPE: &str = include_str!("cheat_recipe.txt");

/// In-process backend that always answers with [`CHEAT_RECIPE`] as a single
/// chunk.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheatBackend;

impl CheatBackend {
    /// The one-chunk stream every request gets.
    pub fn recipe_stream() -> impl futures::Stream<Item = &'static str> + Send + 'static {
        stream::once(async { CHEAT_RECIPE })
    }
}

#[async_trait]
impl ChatBackend for CheatBackend {
    fn name(&self) -> &str {
        "cheat"
    }

    async fn stream_chat(&self, request: &ChatRequest) -> Result<TextStream, CookbookError> {
        debug!(
            messages = request.messages.len(),
            "Ignoring conversation, serving canned recipe"
        );
        Ok(Self::recipe_stream().map(|chunk| Ok(chunk.to_string())).boxed())
    }
}
