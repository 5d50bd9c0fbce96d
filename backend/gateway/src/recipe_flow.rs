//! Drives one recipe request from the panel to the chat backend and back.
//!
//! The session lock is held only while staging and while recording the
//! answer, so ingredient edits keep working while the response streams in.

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use cookbook_core::{ChatRequest, CookbookError, TextAccumulator};
use cookbook_logging::{EventLogger, SessionEvent};

use crate::server::GatewayState;

/// Stage the pending query and spawn the request.
///
/// Fails without side effects when a request is already in flight or there is
/// nothing to ask.
pub async fn ask_for_recipe(state: &GatewayState) -> Result<JoinHandle<()>, CookbookError> {
    let (session_id, request) = {
        let mut session = state.session.lock().await;
        let request = session.begin_recipe_request()?;
        (session.id().to_string(), request)
    };

    EventLogger::log_event(
        &session_id,
        SessionEvent::RecipeRequested {
            query: request.last_user_content().unwrap_or_default().to_string(),
            history_len: request.messages.len(),
        },
    );

    let state = state.clone();
    Ok(tokio::spawn(async move {
        run_request(state, session_id, request).await;
    }))
}

async fn run_request(state: GatewayState, session_id: String, request: ChatRequest) {
    let backend = state.backend.name().to_string();
    debug!(backend = %backend, "Sending recipe request");

    let result = match state.backend.stream_chat(&request).await {
        Ok(stream) => TextAccumulator::collect(stream).await,
        Err(e) => Err(e),
    };

    let mut session = state.session.lock().await;
    let outcome = result.and_then(|text| {
        let bytes = text.len();
        session.complete_recipe_request(text).map(|_| bytes)
    });

    match outcome {
        Ok(bytes) => {
            info!(backend = %backend, bytes, "Recipe received");
            EventLogger::log_event(&session_id, SessionEvent::RecipeReceived { backend, bytes });
        }
        Err(e) => {
            warn!(backend = %backend, error = %e, "Recipe request failed");
            session.fail_recipe_request();
            EventLogger::log_event(
                &session_id,
                SessionEvent::RecipeFailed {
                    backend,
                    error_msg: e.to_string(),
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use cookbook_core::{
        CHEAT_RECIPE, ChatBackend, CheatBackend, DEFAULT_SEED_PROMPT, PanelState, Role,
        SessionAction, TextStream,
    };
    use tokio::sync::Notify;

    use super::*;
    use crate::server::PageSettings;
    use crate::server::test_support::spawn_test_server;

    struct FailingBackend;

    /// Answers with the canned recipe once the gate is opened.
    struct GatedBackend(Arc<Notify>);

    #[async_trait]
    impl ChatBackend for GatedBackend {
        fn name(&self) -> &str {
            "gated"
        }

        async fn stream_chat(&self, request: &ChatRequest) -> Result<TextStream, CookbookError> {
            self.0.notified().await;
            CheatBackend.stream_chat(request).await
        }
    }

    #[async_trait]
    impl ChatBackend for FailingBackend {
        fn name(&self) -> &str {
            "failing"
        }

        async fn stream_chat(&self, _request: &ChatRequest) -> Result<TextStream, CookbookError> {
            Err(CookbookError::Backend {
                backend: "failing".into(),
                message: "kitchen on fire".into(),
            })
        }
    }

    #[tokio::test]
    async fn test_end_to_end_flour_and_sugar() {
        let server = spawn_test_server().await;
        {
            let mut session = server.state.session.lock().await;
            session.add_ingredient("flour");
            session.add_ingredient("sugar");
            assert_eq!(session.recipe_query(), "flour, sugar");
            assert_eq!(session.panel().pending(), "flour, sugar");
        }

        ask_for_recipe(&server.state).await.unwrap().await.unwrap();

        let session = server.state.session.lock().await;
        let transcript: Vec<_> = session.panel().transcript().collect();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].content, CHEAT_RECIPE);
        assert_eq!(session.panel().state(), PanelState::Displaying);

        let roles: Vec<_> = session.panel().messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
    }

    #[tokio::test]
    async fn test_reset_keeps_displayed_recipe() {
        let server = spawn_test_server().await;
        server.state.session.lock().await.add_ingredient("eggs");
        ask_for_recipe(&server.state).await.unwrap().await.unwrap();

        let mut session = server.state.session.lock().await;
        session.add_ingredient("milk");
        session.apply(SessionAction::ResetQuery);
        assert_eq!(session.panel().pending(), "");
        assert_eq!(session.panel().transcript().count(), 1);
    }

    #[tokio::test]
    async fn test_second_ask_rejected_while_in_flight() {
        let gate = Arc::new(Notify::new());
        let state = GatewayState::new(
            Arc::new(GatedBackend(gate.clone())),
            PageSettings::default(),
            DEFAULT_SEED_PROMPT,
        );
        state.session.lock().await.add_ingredient("salt");

        let first = ask_for_recipe(&state).await.unwrap();
        assert!(matches!(
            ask_for_recipe(&state).await,
            Err(CookbookError::RequestInFlight)
        ));

        // Ingredient edits stay responsive while the request is pending.
        {
            let mut session = state.session.lock().await;
            session.add_ingredient("pepper");
            assert_eq!(session.panel().state(), PanelState::Requesting);
            assert_eq!(session.panel().pending(), "salt, pepper");
        }

        gate.notify_one();
        first.await.unwrap();

        let session = state.session.lock().await;
        assert_eq!(session.panel().state(), PanelState::Displaying);
        assert_eq!(session.panel().transcript().count(), 1);
        assert_eq!(session.panel().pending(), "salt, pepper");
    }

    #[tokio::test]
    async fn test_ask_with_nothing_staged_is_rejected() {
        let server = spawn_test_server().await;
        assert!(matches!(
            ask_for_recipe(&server.state).await,
            Err(CookbookError::EmptyQuery)
        ));
    }

    #[tokio::test]
    async fn test_failed_request_is_recorded() {
        let state = GatewayState::new(
            Arc::new(FailingBackend),
            PageSettings::default(),
            DEFAULT_SEED_PROMPT,
        );
        state.session.lock().await.add_ingredient("salt");

        ask_for_recipe(&state).await.unwrap().await.unwrap();

        let session = state.session.lock().await;
        assert_eq!(session.panel().state(), PanelState::QueryStaged);
        assert_eq!(session.panel().transcript().count(), 0);
    }
}
