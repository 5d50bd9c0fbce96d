//! Ingredient list and the store that owns it.
//!
//! The list is immutable: `add` and `remove` hand back a new list and leave the
//! receiver untouched. The store swaps in the new list and publishes the
//! derived recipe query to every subscriber.

use std::sync::Arc;

use serde::{Serialize, Serializer};
use tokio::sync::watch;
use tracing::debug;

/// Separator used when joining ingredients into a recipe query.
pub const QUERY_SEPARATOR: &str = ", ";

/// Ordered, duplicate-free sequence of trimmed ingredient names.
#[derive(Debug, Clone)]
pub struct IngredientList {
    items: Arc<[String]>,
}

impl IngredientList {
    pub fn new() -> Self {
        Self {
            items: Arc::from(Vec::new()),
        }
    }

    /// Return a list with `candidate` appended.
    ///
    /// The candidate is trimmed first. Empty or already present values give
    /// back the same list.
    pub fn add(&self, candidate: &str) -> Self {
        let value = candidate.trim();
        if value.is_empty() || self.contains(value) {
            return self.clone();
        }
        let mut items = self.items.to_vec();
        items.push(value.to_string());
        Self {
            items: items.into(),
        }
    }

    /// Return a list with every entry equal to `target` dropped.
    pub fn remove(&self, target: &str) -> Self {
        if !self.contains(target) {
            return self.clone();
        }
        let items: Vec<String> = self
            .items
            .iter()
            .filter(|item| item.as_str() != target)
            .cloned()
            .collect();
        Self {
            items: items.into(),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.items.iter().any(|item| item == value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Ingredients joined with `", "`.
    pub fn recipe_query(&self) -> String {
        self.items.join(QUERY_SEPARATOR)
    }

    /// True when both lists share the same storage, i.e. no edit happened.
    fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl Default for IngredientList {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for IngredientList {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for IngredientList {}

impl Serialize for IngredientList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

impl<S: AsRef<str>> FromIterator<S> for IngredientList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        iter.into_iter()
            .fold(IngredientList::new(), |list, item| list.add(item.as_ref()))
    }
}

/// Session-owned ingredient state.
///
/// Every accepted edit republishes the recipe query on a `watch` channel so
/// the recipe panel can restage its pending buffer.
#[derive(Debug)]
pub struct IngredientStore {
    list: IngredientList,
    query_tx: watch::Sender<String>,
}

impl IngredientStore {
    pub fn new() -> Self {
        let (query_tx, _) = watch::channel(String::new());
        Self {
            list: IngredientList::new(),
            query_tx,
        }
    }

    pub fn ingredients(&self) -> &IngredientList {
        &self.list
    }

    pub fn recipe_query(&self) -> String {
        self.list.recipe_query()
    }

    /// Subscribe to recipe query changes. The current value counts as seen.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.query_tx.subscribe()
    }

    /// Add an ingredient. Returns `false` when the value was rejected.
    pub fn add(&mut self, candidate: &str) -> bool {
        let next = self.list.add(candidate);
        self.replace(next)
    }

    /// Remove an ingredient. Returns `false` when it was not present.
    pub fn remove(&mut self, target: &str) -> bool {
        let next = self.list.remove(target);
        self.replace(next)
    }

    fn replace(&mut self, next: IngredientList) -> bool {
        if next.is_same(&self.list) {
            return false;
        }
        self.list = next;
        let query = self.list.recipe_query();
        debug!(count = self.list.len(), query = %query, "Ingredient list changed");
        self.query_tx.send_replace(query);
        true
    }
}

impl Default for IngredientStore {
    fn default() -> Self {
        Self::new()
    }
}
