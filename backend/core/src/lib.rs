//! Core state for the cookbook app: the ingredient store, the input form,
//! the recipe request panel and the chat backend seam.

pub mod error;
pub mod form;
pub mod ingredients;
pub mod message;
pub mod panel;
pub mod recipe;
pub mod session;
pub mod stream;
pub mod traits;

pub use error::CookbookError;
pub use form::IngredientForm;
pub use ingredients::{IngredientList, IngredientStore};
pub use message::{ChatMessage, ChatRequest, Role, DEFAULT_SEED_PROMPT};
pub use panel::{PanelState, RecipePanel};
pub use recipe::{CheatBackend, CHEAT_RECIPE};
pub use session::{CookbookSession, IngredientChange, SessionAction, SessionSnapshot};
pub use stream::{TextAccumulator, Utf8Decoder};
pub use traits::{ChatBackend, TextStream};
