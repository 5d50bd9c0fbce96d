//! Ingredient input form state.

use crate::ingredients::IngredientStore;

/// Live text buffer behind the "Enter ingredient" input.
#[derive(Debug, Clone, Default)]
pub struct IngredientForm {
    buffer: String,
}

impl IngredientForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffer with the current input text.
    pub fn input(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Forward the trimmed buffer to the store and clear it.
    ///
    /// The buffer is cleared even when the store rejects the value. Returns
    /// the accepted ingredient, if any.
    pub fn submit(&mut self, store: &mut IngredientStore) -> Option<String> {
        let value = std::mem::take(&mut self.buffer);
        let value = value.trim();
        store.add(value).then(|| value.to_string())
    }
}
