use crate::error::ActionError;
use crate::models::{KeyValueStore, PendingUndo, Recipe, RecipeForm, RecipeStore};
use crate::search::SearchFilter;
use crate::ui::{form, help, recipes};
use ratatui::Frame;
use tracing::{debug, info};

/// Input Mode Enumeration
/// Decides which handler receives key events and which overlay is drawn on
/// top of the recipe list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    AddForm,
    EditForm,
    HelpMenu,
}

/// Focusable parts of the add/edit form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Quantity,
    Ingredient,
    IngredientList,
    Step,
    StepList,
}

impl FormField {
    const ORDER: [FormField; 6] = [
        FormField::Name,
        FormField::Quantity,
        FormField::Ingredient,
        FormField::IngredientList,
        FormField::Step,
        FormField::StepList,
    ];

    pub fn next(self) -> Self {
        let position = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(position + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        let position = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(position + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn is_list(self) -> bool {
        matches!(self, FormField::IngredientList | FormField::StepList)
    }
}

/// The one recipe currently open for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub index: usize,
    pub form: RecipeForm,
}

/// Main Application State Container
/// Holds the recipe store together with all transient view state: both
/// forms, the undo slot, the search filter, the list selection and the
/// status messages. Every user action is a method on this struct and runs to
/// completion before the next key event is read.
#[derive(Debug)]
pub struct App {
    pub store: RecipeStore,
    pub add_form: RecipeForm,
    pub edit: Option<EditSession>,
    pub pending_undo: PendingUndo,
    pub search: SearchFilter,
    pub selected: usize,
    pub input_mode: InputMode,
    pub focused_field: FormField,
    pub selected_staged: usize,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub warning_message: Option<String>,
    pub needs_redraw: bool,
    write_failed: bool,
}

impl App {
    /// Loads the store from `storage` and builds the initial view.
    /// A corrupt or unreadable store starts empty with a visible warning.
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        let (store, load_error) = RecipeStore::load(storage);
        let mut app = Self::with_store(store);
        if let Some(error) = load_error {
            app.warning_message = Some(format!("Starting with an empty recipe box: {error}"));
        }
        info!(recipes = app.store.len(), "recipe box ready");
        app
    }

    pub fn with_store(store: RecipeStore) -> Self {
        Self {
            store,
            add_form: RecipeForm::new(),
            edit: None,
            pending_undo: PendingUndo::NoPendingUndo,
            search: SearchFilter::default(),
            selected: 0,
            input_mode: InputMode::Normal,
            focused_field: FormField::Name,
            selected_staged: 0,
            error_message: None,
            success_message: None,
            warning_message: None,
            needs_redraw: true,
            write_failed: false,
        }
    }

    // Messages

    pub fn set_error_message(&mut self, message: String) {
        self.error_message = Some(message);
        self.success_message = None;
    }

    pub fn set_success_message(&mut self, message: String) {
        self.success_message = Some(message);
        self.error_message = None;
    }

    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.success_message = None;
        self.warning_message = None;
    }

    fn report(&mut self, error: &ActionError) {
        self.set_error_message(error.to_string());
    }

    /// Shows a failed write, and drops that warning again once a later write
    /// lands.
    fn collect_persist_warning(&mut self) {
        match self.store.take_persist_warning() {
            Some(error) => {
                self.warning_message = Some(format!("Changes kept in memory only: {error}"));
                self.write_failed = true;
            }
            None if self.write_failed => {
                self.warning_message = None;
                self.write_failed = false;
            }
            None => {}
        }
    }

    /// Re-derives the filtered view and keeps the selection inside it.
    fn after_store_change(&mut self) {
        self.collect_persist_warning();
        self.search.refresh(self.store.recipes());
        self.clamp_selection();
    }

    // List view

    /// Store indices currently on screen, in store order.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.search.visible(self.store.len())
    }

    pub fn visible_recipes(&self) -> Vec<(usize, &Recipe)> {
        self.visible_indices()
            .into_iter()
            .filter_map(|index| self.store.get(index).map(|recipe| (index, recipe)))
            .collect()
    }

    /// Store index of the highlighted row, if the list is not empty.
    pub fn selected_index(&self) -> Option<usize> {
        self.visible_indices().get(self.selected).copied()
    }

    pub fn selected_recipe(&self) -> Option<&Recipe> {
        self.selected_index().and_then(|index| self.store.get(index))
    }

    pub fn next_recipe(&mut self) {
        let len = self.visible_indices().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn previous_recipe(&mut self) {
        let len = self.visible_indices().len();
        if len > 0 {
            self.selected = if self.selected > 0 {
                self.selected - 1
            } else {
                len - 1
            };
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_indices().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn select_store_index(&mut self, index: usize) {
        if let Some(row) = self.visible_indices().iter().position(|i| *i == index) {
            self.selected = row;
        }
    }

    // Add form

    pub fn open_add_form(&mut self) {
        self.clear_messages();
        self.input_mode = InputMode::AddForm;
        self.focused_field = FormField::Name;
        self.selected_staged = 0;
    }

    /// Closes the add form. The draft stays for the next time it opens.
    pub fn close_add_form(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Validates the add form and appends the recipe it describes.
    /// On success the recipe becomes the pending undo and the form is
    /// cleared; on failure nothing but the error message changes.
    pub fn submit_add(&mut self) -> Result<(), ActionError> {
        let recipe = match self.add_form.validate() {
            Ok(recipe) => recipe,
            Err(error) => {
                let error = ActionError::from(error);
                self.report(&error);
                return Err(error);
            }
        };

        info!(name = %recipe.name, "recipe added");
        let name = recipe.name.clone();
        self.store.append(recipe.clone());
        self.pending_undo = PendingUndo::PendingAdd(recipe);
        self.add_form.clear();
        self.focused_field = FormField::Name;
        self.selected_staged = 0;
        self.input_mode = InputMode::Normal;

        self.set_success_message(format!("Added \"{}\"", name));
        self.after_store_change();
        let last = self.store.len() - 1;
        self.select_store_index(last);
        Ok(())
    }

    /// Removes the most recently added recipe, once.
    pub fn undo_add(&mut self) -> Result<(), ActionError> {
        let PendingUndo::PendingAdd(recipe) = &self.pending_undo else {
            return Err(ActionError::NothingToUndo);
        };
        let recipe = recipe.clone();
        self.pending_undo = PendingUndo::NoPendingUndo;

        if self.store.recipes().last() != Some(&recipe) {
            return Err(ActionError::StaleUndo);
        }

        let removed = self.store.remove_last()?;
        debug!(name = %removed.name, "undo add");
        self.success_message = None;
        self.after_store_change();
        Ok(())
    }

    // Edit form

    /// Opens the recipe at `index` for editing. Any other open edit is
    /// discarded, and an undo for a previous edit expires.
    pub fn start_edit(&mut self, index: usize) -> bool {
        let Some(recipe) = self.store.get(index) else {
            return false;
        };

        self.edit = Some(EditSession {
            index,
            form: RecipeForm::from_recipe(recipe),
        });
        if matches!(self.pending_undo, PendingUndo::PendingEdit(..)) {
            self.pending_undo = PendingUndo::NoPendingUndo;
            self.success_message = None;
        }
        self.error_message = None;
        self.input_mode = InputMode::EditForm;
        self.focused_field = FormField::Name;
        self.selected_staged = 0;
        true
    }

    pub fn start_edit_selected(&mut self) -> bool {
        match self.selected_index() {
            Some(index) => self.start_edit(index),
            None => false,
        }
    }

    /// Writes the edit form back to its index and remembers the old recipe
    /// so the edit can be undone.
    pub fn save_edit(&mut self) -> Result<(), ActionError> {
        let Some(session) = self.edit.as_ref() else {
            return Err(ActionError::NotEditing);
        };
        let index = session.index;

        let recipe = match session.form.validate() {
            Ok(recipe) => recipe,
            Err(error) => {
                let error = ActionError::from(error);
                self.report(&error);
                return Err(error);
            }
        };

        let name = recipe.name.clone();
        let previous = match self.store.replace_at(index, recipe) {
            Ok(previous) => previous,
            Err(error) => {
                self.edit = None;
                self.input_mode = InputMode::Normal;
                let error = ActionError::from(error);
                self.report(&error);
                return Err(error);
            }
        };

        info!(index, name = %name, "recipe updated");
        self.pending_undo = PendingUndo::PendingEdit(index, previous);
        self.edit = None;
        self.input_mode = InputMode::Normal;
        self.set_success_message(format!("Updated \"{}\"", name));
        self.after_store_change();
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
        self.input_mode = InputMode::Normal;
        self.error_message = None;
    }

    /// Puts the pre-edit recipe back, provided its index still exists.
    pub fn undo_edit(&mut self) -> Result<(), ActionError> {
        let PendingUndo::PendingEdit(index, previous) = &self.pending_undo else {
            return Err(ActionError::NothingToUndo);
        };
        let (index, previous) = (*index, previous.clone());
        self.pending_undo = PendingUndo::NoPendingUndo;

        if index >= self.store.len() {
            self.success_message = None;
            self.warning_message = Some(ActionError::StaleUndo.to_string());
            return Err(ActionError::StaleUndo);
        }

        self.store.replace_at(index, previous)?;
        debug!(index, "undo edit");
        self.success_message = None;
        self.after_store_change();
        Ok(())
    }

    /// Undoes whichever change the undo slot remembers.
    pub fn undo(&mut self) -> Result<(), ActionError> {
        match self.pending_undo {
            PendingUndo::NoPendingUndo => Err(ActionError::NothingToUndo),
            PendingUndo::PendingAdd(_) => self.undo_add(),
            PendingUndo::PendingEdit(..) => self.undo_edit(),
        }
    }

    /// The form that key input currently edits.
    pub fn active_form_mut(&mut self) -> Option<&mut RecipeForm> {
        match self.input_mode {
            InputMode::AddForm => Some(&mut self.add_form),
            InputMode::EditForm => self.edit.as_mut().map(|session| &mut session.form),
            _ => None,
        }
    }

    pub fn active_form(&self) -> Option<&RecipeForm> {
        match self.input_mode {
            InputMode::AddForm => Some(&self.add_form),
            InputMode::EditForm => self.edit.as_ref().map(|session| &session.form),
            _ => None,
        }
    }

    /// Length of the staged list behind the focused list field.
    pub fn focused_list_len(&self) -> usize {
        match (self.active_form(), self.focused_field) {
            (Some(form), FormField::IngredientList) => form.ingredients.len(),
            (Some(form), FormField::StepList) => form.steps.len(),
            _ => 0,
        }
    }

    pub fn focus_next_field(&mut self) {
        self.focused_field = self.focused_field.next();
        self.selected_staged = 0;
    }

    pub fn focus_previous_field(&mut self) {
        self.focused_field = self.focused_field.previous();
        self.selected_staged = 0;
    }

    /// Removes the highlighted staged ingredient or step.
    pub fn remove_selected_staged(&mut self) -> bool {
        let index = self.selected_staged;
        let field = self.focused_field;
        let removed = match (self.active_form_mut(), field) {
            (Some(form), FormField::IngredientList) => form.remove_ingredient(index).is_some(),
            (Some(form), FormField::StepList) => form.remove_step(index).is_some(),
            _ => false,
        };
        self.selected_staged = self
            .selected_staged
            .min(self.focused_list_len().saturating_sub(1));
        removed
    }

    /// Submits the add form or saves the edit, whichever is open.
    pub fn submit_active_form(&mut self) -> Result<(), ActionError> {
        match self.input_mode {
            InputMode::EditForm => self.save_edit(),
            _ => self.submit_add(),
        }
    }

    // Search

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search.set_query(query, self.store.recipes());
        self.selected = 0;
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut query = std::mem::take(&mut self.search.query);
        query.push(c);
        self.set_search_query(query);
    }

    pub fn pop_search_char(&mut self) {
        let mut query = std::mem::take(&mut self.search.query);
        query.pop();
        self.set_search_query(query);
    }

    /// Clears the query and restores the unfiltered list.
    pub fn undo_search(&mut self) {
        let keep = self.selected_index();
        self.search.clear();
        self.selected = keep.unwrap_or(0);
        self.clamp_selection();
    }

    /// Renders the current application state to the terminal frame
    pub fn render(&self, frame: &mut Frame) {
        recipes::render(frame, self);
        match self.input_mode {
            InputMode::AddForm | InputMode::EditForm => form::render(frame, self),
            InputMode::HelpMenu => help::render(frame),
            InputMode::Normal | InputMode::Search => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, MemoryStorage};

    fn app() -> App {
        App::new(Box::new(MemoryStorage::new()))
    }

    fn fill(form: &mut RecipeForm, name: &str) {
        form.name = name.to_string();
        form.quantity = "1".to_string();
        form.ingredient = "egg".to_string();
        form.add_ingredient();
        form.step = "Cook".to_string();
        form.add_step();
    }

    fn add(app: &mut App, name: &str) {
        app.open_add_form();
        fill(&mut app.add_form, name);
        app.submit_add().unwrap();
    }

    #[test]
    fn invalid_submit_is_visible_and_changes_nothing() {
        let mut app = app();
        app.open_add_form();
        app.add_form.name = "Eggs".to_string();

        assert!(matches!(app.submit_add(), Err(ActionError::Validation(_))));
        assert!(app.store.is_empty());
        assert_eq!(app.input_mode, InputMode::AddForm);
        assert_eq!(app.add_form.name, "Eggs");
        assert!(app.error_message.as_deref().unwrap().contains("ingredient"));
    }

    #[test]
    fn submit_clears_form_and_arms_undo() {
        let mut app = app();
        add(&mut app, "Eggs");

        assert_eq!(app.store.len(), 1);
        assert!(app.add_form.is_blank());
        assert_eq!(app.success_message.as_deref(), Some("Added \"Eggs\""));
        assert!(matches!(app.pending_undo, PendingUndo::PendingAdd(_)));
    }

    #[test]
    fn undo_add_works_once() {
        let mut app = app();
        add(&mut app, "A");
        add(&mut app, "B");

        app.undo().unwrap();
        assert_eq!(app.store.len(), 1);
        assert!(matches!(app.undo(), Err(ActionError::NothingToUndo)));
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn start_edit_out_of_range_is_ignored() {
        let mut app = app();
        assert!(!app.start_edit(0));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.edit.is_none());
    }

    #[test]
    fn starting_another_edit_discards_the_first() {
        let mut app = app();
        add(&mut app, "A");
        add(&mut app, "B");

        app.start_edit(0);
        app.active_form_mut().unwrap().name = "changed".to_string();
        app.start_edit(1);

        assert_eq!(app.edit.as_ref().unwrap().index, 1);
        assert_eq!(app.edit.as_ref().unwrap().form.name, "B");
        assert_eq!(app.store.recipes()[0].name, "A");
    }

    #[test]
    fn save_edit_then_undo_restores() {
        let mut app = app();
        add(&mut app, "A");
        add(&mut app, "B");

        app.start_edit(0);
        app.active_form_mut().unwrap().name = "A2".to_string();
        app.save_edit().unwrap();

        assert_eq!(app.store.recipes()[0].name, "A2");
        assert_eq!(app.store.recipes()[1].name, "B");
        assert_eq!(app.input_mode, InputMode::Normal);

        app.undo().unwrap();
        assert_eq!(app.store.recipes()[0].name, "A");
        assert!(!app.pending_undo.is_pending());
    }

    #[test]
    fn save_without_session_fails() {
        let mut app = app();
        assert!(matches!(app.save_edit(), Err(ActionError::NotEditing)));
    }

    #[test]
    fn invalid_edit_stays_open() {
        let mut app = app();
        add(&mut app, "A");
        app.start_edit(0);
        app.active_form_mut().unwrap().steps.clear();

        assert!(app.save_edit().is_err());
        assert_eq!(app.input_mode, InputMode::EditForm);
        assert_eq!(app.store.recipes()[0].steps, vec!["Cook".to_string()]);
    }

    #[test]
    fn cancel_edit_leaves_store_alone() {
        let mut app = app();
        add(&mut app, "A");
        app.start_edit(0);
        app.active_form_mut().unwrap().name = "zzz".to_string();
        app.cancel_edit();

        assert!(app.edit.is_none());
        assert_eq!(app.store.recipes()[0].name, "A");
    }

    #[test]
    fn new_edit_session_expires_edit_undo() {
        let mut app = app();
        add(&mut app, "A");
        app.start_edit(0);
        app.active_form_mut().unwrap().name = "A2".to_string();
        app.save_edit().unwrap();

        app.start_edit(0);
        assert_eq!(app.pending_undo, PendingUndo::NoPendingUndo);
    }

    #[test]
    fn stale_edit_undo_is_refused() {
        let mut app = app();
        add(&mut app, "A");
        app.pending_undo = PendingUndo::PendingEdit(
            4,
            Recipe::new("X", vec![Ingredient::new("", "x")], vec!["x".to_string()]),
        );

        assert!(matches!(app.undo(), Err(ActionError::StaleUndo)));
        assert!(app.warning_message.is_some());
        assert_eq!(app.store.recipes()[0].name, "A");
    }

    #[test]
    fn search_follows_store_changes() {
        let mut app = app();
        add(&mut app, "Omelette");
        app.set_search_query("pancake");
        assert!(app.visible_recipes().is_empty());

        add(&mut app, "Pancakes");
        assert_eq!(app.visible_indices(), vec![1]);
        assert_eq!(
            app.search.message.as_deref(),
            Some("Found 1 recipe matching \"pancake\"")
        );

        app.undo_search();
        assert_eq!(app.visible_indices(), vec![0, 1]);
    }

    #[test]
    fn remove_staged_item_from_focused_list() {
        let mut app = app();
        app.open_add_form();
        fill(&mut app.add_form, "A");
        app.add_form.step = "Serve".to_string();
        app.add_form.add_step();

        app.focused_field = FormField::StepList;
        app.selected_staged = 1;
        assert!(app.remove_selected_staged());
        assert_eq!(app.add_form.steps, vec!["Cook".to_string()]);
        assert_eq!(app.selected_staged, 0);
    }

    #[test]
    fn write_failure_surfaces_warning() {
        let mut app = App::new(Box::new(MemoryStorage::rejecting_writes()));
        add(&mut app, "A");

        assert_eq!(app.store.len(), 1);
        assert!(app.warning_message.as_deref().unwrap().contains("memory only"));
    }

    #[test]
    fn successful_write_clears_memory_only_warning() {
        let mut app = App::new(Box::new(MemoryStorage::rejecting_next_writes(1)));
        add(&mut app, "A");
        assert!(app.warning_message.is_some());

        app.start_edit(0);
        app.active_form_mut().unwrap().name = "B".to_string();
        app.save_edit().unwrap();

        assert!(app.warning_message.is_none());
        assert_eq!(app.success_message.as_deref(), Some("Updated \"B\""));
    }

    #[test]
    fn successful_write_keeps_unrelated_warnings() {
        let mut app = app();
        app.open_add_form();
        fill(&mut app.add_form, "A");
        app.warning_message = Some("Recipes will not be saved".to_string());
        app.submit_add().unwrap();

        assert_eq!(app.warning_message.as_deref(), Some("Recipes will not be saved"));
    }

    #[test]
    fn corrupt_store_starts_empty_with_warning() {
        let storage = MemoryStorage::with_entry(crate::models::RECIPES_KEY, "nope");
        let app = App::new(Box::new(storage));

        assert!(app.store.is_empty());
        assert!(app.warning_message.is_some());
    }
}
