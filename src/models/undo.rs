use crate::models::Recipe;

/// The single undo slot shared by add and edit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PendingUndo {
    #[default]
    NoPendingUndo,
    /// The recipe most recently appended to the store.
    PendingAdd(Recipe),
    /// Store index of the most recent edit and the recipe it replaced.
    PendingEdit(usize, Recipe),
}

impl PendingUndo {
    pub fn is_pending(&self) -> bool {
        !matches!(self, PendingUndo::NoPendingUndo)
    }
}
