//! Recipe request panel.
//!
//! Holds the pending query buffer and the chat history. The buffer follows the
//! ingredient store through a `watch` subscription: whenever the derived query
//! changes, the buffer is overwritten with it.

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::CookbookError;
use crate::message::{ChatMessage, ChatRequest, Role};

/// Where the panel is in the ask/answer cycle.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    /// Nothing staged yet, only the seed message exists.
    #[default]
    Idle,
    /// The pending buffer holds a query (possibly empty after a reset).
    QueryStaged,
    /// A request is in flight.
    Requesting,
    /// The latest assistant answer is available.
    Displaying,
}

#[derive(Debug)]
pub struct RecipePanel {
    query_rx: watch::Receiver<String>,
    pending: String,
    messages: Vec<ChatMessage>,
    state: PanelState,
}

impl RecipePanel {
    pub fn new(query_rx: watch::Receiver<String>, seed_prompt: impl Into<String>) -> Self {
        Self {
            query_rx,
            pending: String::new(),
            messages: vec![ChatMessage::seed(seed_prompt)],
            state: PanelState::Idle,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Full history, seed message included.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Assistant messages only; this is what the transcript view shows.
    pub fn transcript(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter().filter(|m| m.role == Role::Assistant)
    }

    /// Pull the latest derived query into the pending buffer, if it changed.
    ///
    /// Returns `true` when the buffer was overwritten.
    pub fn sync(&mut self) -> bool {
        if !self.query_rx.has_changed().unwrap_or(false) {
            return false;
        }
        self.pending = self.query_rx.borrow_and_update().clone();
        if self.state != PanelState::Requesting {
            self.state = PanelState::QueryStaged;
        }
        debug!(pending = %self.pending, "Recipe query staged");
        true
    }

    /// Start a request: append the pending buffer as a user message and
    /// return the history to send.
    ///
    /// Rejected while another request is in flight, and when the buffer is
    /// empty.
    pub fn begin_request(&mut self) -> Result<ChatRequest, CookbookError> {
        self.sync();
        if self.state == PanelState::Requesting {
            return Err(CookbookError::RequestInFlight);
        }
        if self.pending.is_empty() {
            return Err(CookbookError::EmptyQuery);
        }

        let content = std::mem::take(&mut self.pending);
        info!(query = %content, history = self.messages.len(), "Asking for recipe");
        self.messages.push(ChatMessage::user(content));
        self.state = PanelState::Requesting;

        Ok(ChatRequest {
            messages: self.messages.clone(),
        })
    }

    /// Append the completed assistant answer.
    pub fn complete_request(&mut self, content: String) -> Result<&ChatMessage, CookbookError> {
        if self.state != PanelState::Requesting {
            return Err(CookbookError::NotRequesting);
        }
        self.messages.push(ChatMessage::assistant(content));
        self.state = PanelState::Displaying;
        Ok(&self.messages[self.messages.len() - 1])
    }

    /// Leave the requesting state after a failed request.
    pub fn fail_request(&mut self) {
        if self.state == PanelState::Requesting {
            self.state = PanelState::QueryStaged;
        }
    }

    /// Clear the pending buffer. History is kept.
    ///
    /// An in-flight request stays in flight; only the buffer is cleared.
    pub fn reset(&mut self) {
        self.sync();
        self.pending.clear();
        if self.state != PanelState::Requesting {
            self.state = PanelState::QueryStaged;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredients::IngredientStore;
    use crate::message::DEFAULT_SEED_PROMPT;

    fn panel_for(store: &IngredientStore) -> RecipePanel {
        RecipePanel::new(store.subscribe(), DEFAULT_SEED_PROMPT)
    }

    #[test]
    fn test_starts_idle_with_seed_only() {
        let store = IngredientStore::new();
        let panel = panel_for(&store);
        assert_eq!(panel.state(), PanelState::Idle);
        assert_eq!(panel.messages().len(), 1);
        assert_eq!(panel.messages()[0].role, Role::System);
        assert_eq!(panel.transcript().count(), 0);
    }

    #[test]
    fn test_query_follows_ingredients() {
        let mut store = IngredientStore::new();
        let mut panel = panel_for(&store);

        store.add("salt");
        store.add("pepper");
        assert!(panel.sync());
        assert_eq!(panel.pending(), "salt, pepper");
        assert_eq!(panel.state(), PanelState::QueryStaged);
        assert!(!panel.sync());
    }

    #[test]
    fn test_full_request_cycle() {
        let mut store = IngredientStore::new();
        let mut panel = panel_for(&store);
        store.add("flour");

        let request = panel.begin_request().unwrap();
        assert_eq!(panel.state(), PanelState::Requesting);
        assert_eq!(panel.pending(), "");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.last_user_content(), Some("flour"));

        panel.complete_request("a recipe".to_string()).unwrap();
        assert_eq!(panel.state(), PanelState::Displaying);
        let transcript: Vec<_> = panel.transcript().map(|m| m.content.as_str()).collect();
        assert_eq!(transcript, vec!["a recipe"]);
    }

    #[test]
    fn test_second_request_while_in_flight_is_rejected() {
        let mut store = IngredientStore::new();
        let mut panel = panel_for(&store);
        store.add("flour");
        panel.begin_request().unwrap();

        store.add("sugar");
        assert!(matches!(
            panel.begin_request(),
            Err(CookbookError::RequestInFlight)
        ));
        // The buffer still tracks the ingredients while waiting.
        assert_eq!(panel.pending(), "flour, sugar");
        assert_eq!(panel.state(), PanelState::Requesting);
    }

    #[test]
    fn test_empty_query_is_rejected() {
        let store = IngredientStore::new();
        let mut panel = panel_for(&store);
        assert!(matches!(panel.begin_request(), Err(CookbookError::EmptyQuery)));
        assert_eq!(panel.messages().len(), 1);
    }

    #[test]
    fn test_reset_keeps_transcript() {
        let mut store = IngredientStore::new();
        let mut panel = panel_for(&store);
        store.add("flour");
        panel.begin_request().unwrap();
        panel.complete_request("answer".to_string()).unwrap();

        store.add("sugar");
        panel.sync();
        assert_eq!(panel.pending(), "flour, sugar");

        panel.reset();
        assert_eq!(panel.pending(), "");
        assert_eq!(panel.state(), PanelState::QueryStaged);
        assert_eq!(panel.transcript().count(), 1);
    }

    #[test]
    fn test_complete_without_request_fails() {
        let store = IngredientStore::new();
        let mut panel = panel_for(&store);
        assert!(matches!(
            panel.complete_request("x".to_string()),
            Err(CookbookError::NotRequesting)
        ));
    }

    #[test]
    fn test_failed_request_allows_retry() {
        let mut store = IngredientStore::new();
        let mut panel = panel_for(&store);
        store.add("flour");
        panel.begin_request().unwrap();
        panel.fail_request();
        assert_eq!(panel.state(), PanelState::QueryStaged);

        store.add("eggs");
        assert!(panel.begin_request().is_ok());
    }
}
