use crate::error::StoreError;
use crate::models::Recipe;
use crate::models::storage::{KeyValueStore, RECIPES_KEY};
use tracing::{debug, warn};

/// Reads the persisted recipe list. An absent key is an empty list.
pub fn read_recipes(storage: &dyn KeyValueStore) -> Result<Vec<Recipe>, StoreError> {
    match storage.get(RECIPES_KEY)? {
        None => Ok(Vec::new()),
        Some(content) => {
            serde_json::from_str(&content).map_err(|source| StoreError::StorageCorruption {
                key: RECIPES_KEY.to_string(),
                source,
            })
        }
    }
}

/// Ordered recipe list mirrored to a key-value slot after every mutation.
///
/// Persistence is fail-soft: a failed write keeps the in-memory change and
/// leaves the error in [`RecipeStore::take_persist_warning`].
pub struct RecipeStore {
    recipes: Vec<Recipe>,
    storage: Box<dyn KeyValueStore>,
    persist_warning: Option<StoreError>,
}

impl std::fmt::Debug for RecipeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeStore")
            .field("recipes", &self.recipes)
            .field("persist_warning", &self.persist_warning)
            .finish_non_exhaustive()
    }
}

impl RecipeStore {
    /// Loads the store. Unreadable or corrupt data yields an empty store
    /// together with the error that caused the fallback.
    pub fn load(storage: Box<dyn KeyValueStore>) -> (Self, Option<StoreError>) {
        let (recipes, error) = match read_recipes(storage.as_ref()) {
            Ok(recipes) => {
                debug!(count = recipes.len(), "loaded recipes");
                (recipes, None)
            }
            Err(error) => {
                warn!(%error, "falling back to an empty recipe store");
                (Vec::new(), Some(error))
            }
        };

        let store = Self {
            recipes,
            storage,
            persist_warning: None,
        };
        (store, error)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn append(&mut self, recipe: Recipe) {
        debug!(name = %recipe.name, index = self.recipes.len(), "append recipe");
        self.recipes.push(recipe);
        self.persist_soft();
    }

    /// Replaces the recipe at `index` and returns the one it displaced.
    pub fn replace_at(&mut self, index: usize, recipe: Recipe) -> Result<Recipe, StoreError> {
        let len = self.recipes.len();
        let slot = self
            .recipes
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;

        debug!(index, name = %recipe.name, "replace recipe");
        let previous = std::mem::replace(slot, recipe);
        self.persist_soft();
        Ok(previous)
    }

    pub fn remove_last(&mut self) -> Result<Recipe, StoreError> {
        let removed = self.recipes.pop().ok_or(StoreError::Empty)?;
        debug!(name = %removed.name, "remove last recipe");
        self.persist_soft();
        Ok(removed)
    }

    /// Appends every recipe in `recipes` with a single write.
    pub fn extend(&mut self, recipes: Vec<Recipe>) {
        if recipes.is_empty() {
            return;
        }
        debug!(count = recipes.len(), "append recipes");
        self.recipes.extend(recipes);
        self.persist_soft();
    }

    /// Serializes the whole list and writes it to the `recipes` slot.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.recipes).map_err(StoreError::Serialize)?;
        self.storage.set(RECIPES_KEY, &content)
    }

    /// Returns and clears the error of the most recent failed write.
    pub fn take_persist_warning(&mut self) -> Option<StoreError> {
        self.persist_warning.take()
    }

    fn persist_soft(&mut self) {
        match self.persist() {
            Ok(()) => self.persist_warning = None,
            Err(error) => {
                warn!(%error, count = self.recipes.len(), "recipes kept in memory only");
                self.persist_warning = Some(error);
            }
        }
    }
}
