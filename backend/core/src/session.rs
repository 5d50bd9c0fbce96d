//! The per-session state container.
//!
//! Every UI event goes through [`CookbookSession::apply`]; the recipe request
//! is split into `begin`/`complete`/`fail` so callers can release their lock
//! while the response streams in.

use serde::Serialize;
use uuid::Uuid;

use crate::error::CookbookError;
use crate::form::IngredientForm;
use crate::ingredients::{IngredientList, IngredientStore};
use crate::message::ChatRequest;
use crate::panel::{PanelState, RecipePanel};

/// A discrete user input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Keystroke-level update of the ingredient input.
    Input(String),
    /// Submit the ingredient form.
    SubmitIngredient,
    /// Press "Remove" next to an ingredient.
    RemoveIngredient(String),
    /// Press "Reset" in the recipe panel.
    ResetQuery,
}

/// What an action changed in the ingredient list, if anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientChange {
    Added(String),
    Removed(String),
}

pub struct CookbookSession {
    id: Uuid,
    store: IngredientStore,
    form: IngredientForm,
    panel: RecipePanel,
}

impl CookbookSession {
    pub fn new(seed_prompt: impl Into<String>) -> Self {
        let store = IngredientStore::new();
        let panel = RecipePanel::new(store.subscribe(), seed_prompt);
        Self {
            id: Uuid::new_v4(),
            store,
            form: IngredientForm::new(),
            panel,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn ingredients(&self) -> &IngredientList {
        self.store.ingredients()
    }

    pub fn recipe_query(&self) -> String {
        self.store.recipe_query()
    }

    pub fn form(&self) -> &IngredientForm {
        &self.form
    }

    pub fn panel(&self) -> &RecipePanel {
        &self.panel
    }

    /// Apply one UI event.
    pub fn apply(&mut self, action: SessionAction) -> Option<IngredientChange> {
        let change = match action {
            SessionAction::Input(text) => {
                self.form.input(text);
                None
            }
            SessionAction::SubmitIngredient => {
                self.form.submit(&mut self.store).map(IngredientChange::Added)
            }
            SessionAction::RemoveIngredient(target) => self
                .store
                .remove(&target)
                .then_some(IngredientChange::Removed(target)),
            SessionAction::ResetQuery => {
                self.panel.reset();
                None
            }
        };
        self.panel.sync();
        change
    }

    /// Shorthand for typing `text` and submitting the form.
    pub fn add_ingredient(&mut self, text: impl Into<String>) -> Option<IngredientChange> {
        self.apply(SessionAction::Input(text.into()));
        self.apply(SessionAction::SubmitIngredient)
    }

    pub fn begin_recipe_request(&mut self) -> Result<ChatRequest, CookbookError> {
        self.panel.begin_request()
    }

    pub fn complete_recipe_request(&mut self, content: String) -> Result<(), CookbookError> {
        self.panel.complete_request(content).map(|_| ())
    }

    pub fn fail_recipe_request(&mut self) {
        self.panel.fail_request();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            ingredients: self.store.ingredients().clone(),
            input: self.form.buffer().to_string(),
            pending_query: self.panel.pending().to_string(),
            state: self.panel.state(),
            transcript: self.panel.transcript().map(|m| m.content.clone()).collect(),
        }
    }
}

/// Serializable view of a session, as exposed by `GET /api/session`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub ingredients: IngredientList,
    pub input: String,
    pub pending_query: String,
    pub state: PanelState,
    pub transcript: Vec<String>,
}
