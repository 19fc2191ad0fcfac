pub mod export;
pub mod form;
pub mod recipe;
pub mod storage;
pub mod store;
pub mod undo;

pub use export::{ExportFormat, export_recipes, merge_import, read_import};
pub use form::RecipeForm;
pub use recipe::{Ingredient, Recipe};
pub use storage::{KeyValueStore, MemoryStorage, RECIPES_KEY, StorageManager, open_storage};
pub use store::{RecipeStore, read_recipes};
pub use undo::PendingUndo;
