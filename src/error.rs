use thiserror::Error;

/// Failures of the recipe store and the key-value storage beneath it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stored data under `{key}` is corrupt: {source}")]
    StorageCorruption {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize recipes: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("storage write rejected: {0}")]
    WriteRejected(String),
    #[error("recipe index {index} is out of range (store holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("the recipe store is empty")]
    Empty,
}

/// A recipe draft that cannot be submitted yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Recipe needs {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

/// Why a user action left the store untouched.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("No recipe is being edited")]
    NotEditing,
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("The recipe to undo is no longer where it was")]
    StaleUndo,
}
