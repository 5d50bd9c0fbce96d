//! `cookbook ask`: a headless session that streams the recipe to stdout.

use std::io::Write;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::StreamExt;
use tracing::warn;

use cookbook_config::CookbookConfig;
use cookbook_core::{
    ChatBackend, CheatBackend, CookbookSession, IngredientChange, TextAccumulator,
    DEFAULT_SEED_PROMPT,
};
use cookbook_gateway::HttpChatBackend;
use cookbook_logging::{EventLogger, SessionEvent};

use crate::serve_cmd::local_chat_url;

pub async fn run(
    config: CookbookConfig,
    ingredients: Vec<String>,
    endpoint: Option<String>,
    offline: bool,
) -> Result<()> {
    let backend: Arc<dyn ChatBackend> = if offline {
        Arc::new(CheatBackend)
    } else {
        let url = match endpoint.or_else(|| config.endpoint_url().map(str::to_string)) {
            Some(url) => url,
            None => {
                let ip: IpAddr = config
                    .bind_address()
                    .parse()
                    .with_context(|| format!("Invalid bind address: {}", config.bind_address()))?;
                local_chat_url(SocketAddr::new(ip, config.port()))
            }
        };
        Arc::new(HttpChatBackend::new(url))
    };

    let seed_prompt = config.seed_prompt().unwrap_or(DEFAULT_SEED_PROMPT);
    let mut stdout = std::io::stdout();
    ask(backend.as_ref(), seed_prompt, &ingredients, &mut stdout).await?;
    Ok(())
}

/// Add `ingredients`, send the derived query, and copy each streamed chunk to
/// `out` as it arrives. Returns the full answer.
pub async fn ask<W: Write>(
    backend: &dyn ChatBackend,
    seed_prompt: &str,
    ingredients: &[String],
    out: &mut W,
) -> Result<String> {
    let mut session = CookbookSession::new(seed_prompt);
    let session_id = session.id().to_string();

    for ingredient in ingredients {
        match session.add_ingredient(ingredient.as_str()) {
            Some(IngredientChange::Added(name)) => EventLogger::log_event(
                &session_id,
                SessionEvent::IngredientAdded { ingredient: name },
            ),
            _ => warn!(ingredient = %ingredient, "Skipping empty or duplicate ingredient"),
        }
    }

    let request = session
        .begin_recipe_request()
        .context("No ingredients to ask about")?;
    EventLogger::log_event(
        &session_id,
        SessionEvent::RecipeRequested {
            query: request.last_user_content().unwrap_or_default().to_string(),
            history_len: request.messages.len(),
        },
    );

    let backend_name = backend.name().to_string();
    let mut stream = match backend.stream_chat(&request).await {
        Ok(stream) => stream,
        Err(e) => return Err(record_failure(&session_id, &backend_name, e)),
    };

    let mut acc = TextAccumulator::new();
    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => return Err(record_failure(&session_id, &backend_name, e)),
        };
        out.write_all(chunk.as_bytes())?;
        out.flush()?;
        acc.push(&chunk);
    }

    let text = acc.finish();
    let bytes = text.len();
    session.complete_recipe_request(text.clone())?;
    EventLogger::log_event(
        &session_id,
        SessionEvent::RecipeReceived {
            backend: backend_name,
            bytes,
        },
    );
    Ok(text)
}

fn record_failure(session_id: &str, backend: &str, error: cookbook_core::CookbookError) -> anyhow::Error {
    EventLogger::log_event(
        session_id,
        SessionEvent::RecipeFailed {
            backend: backend.to_string(),
            error_msg: error.to_string(),
        },
    );
    anyhow::Error::new(error).context("Recipe request failed")
}
