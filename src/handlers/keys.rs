//! Keyboard Input Handling Module
//!
//! Translates key events into calls on [`App`]. Each key is handled to
//! completion before the next one is read.

use crate::app::{App, FormField, InputMode};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

/// Main keyboard event handler and dispatcher
/// Routes the key to the handler for the current input mode. Returns true
/// when the application should quit.
pub fn handle_key_events(key: KeyEvent, app: &mut App) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_keys(key, app),
        InputMode::Search => handle_search_keys(key, app),
        InputMode::AddForm | InputMode::EditForm => handle_form_keys(key, app),
        InputMode::HelpMenu => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.input_mode = InputMode::Normal;
            }
            false
        }
    }
}

fn handle_normal_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,

        KeyCode::Up | KeyCode::Char('k') => app.previous_recipe(),
        KeyCode::Down | KeyCode::Char('j') => app.next_recipe(),

        KeyCode::Char('a') | KeyCode::Char('A') => app.open_add_form(),

        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => {
            if !app.start_edit_selected() {
                app.set_error_message("Select a recipe to edit".to_string());
            }
        }

        KeyCode::Char('u') | KeyCode::Char('U') => {
            if let Err(e) = app.undo() {
                app.set_error_message(e.to_string());
            }
        }

        KeyCode::Char('/') => {
            app.clear_messages();
            app.input_mode = InputMode::Search;
        }
        KeyCode::Char('x') | KeyCode::Char('X') => app.undo_search(),

        KeyCode::Char('?') => app.input_mode = InputMode::HelpMenu,
        KeyCode::Esc => app.clear_messages(),
        _ => {}
    }
    false
}

fn handle_search_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Up => app.previous_recipe(),
        KeyCode::Down => app.next_recipe(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.push_search_char(c)
        }
        _ => {}
    }
    false
}

fn handle_form_keys(key: KeyEvent, app: &mut App) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('s') if ctrl => {
            if let Err(error) = app.submit_active_form() {
                debug!(%error, "form submission refused");
            }
        }
        KeyCode::Esc => match app.input_mode {
            InputMode::EditForm => app.cancel_edit(),
            _ => app.close_add_form(),
        },
        KeyCode::Tab => app.focus_next_field(),
        KeyCode::BackTab => app.focus_previous_field(),

        KeyCode::Up if app.focused_field.is_list() => {
            app.selected_staged = app.selected_staged.saturating_sub(1);
        }
        KeyCode::Down if app.focused_field.is_list() => {
            let len = app.focused_list_len();
            if app.selected_staged + 1 < len {
                app.selected_staged += 1;
            }
        }
        KeyCode::Delete | KeyCode::Backspace if app.focused_field.is_list() => {
            app.remove_selected_staged();
        }

        KeyCode::Enter => handle_form_enter(app),
        KeyCode::Backspace => {
            if let Some(buffer) = focused_buffer(app) {
                buffer.pop();
            }
        }
        KeyCode::Char(c) if !ctrl => {
            if let Some(buffer) = focused_buffer(app) {
                buffer.push(c);
            }
        }
        _ => {}
    }
    false
}

fn handle_form_enter(app: &mut App) {
    let field = app.focused_field;
    let Some(form) = app.active_form_mut() else {
        return;
    };

    match field {
        FormField::Name => app.focus_next_field(),
        FormField::Quantity => {
            if form.ingredient.trim().is_empty() {
                app.focused_field = FormField::Ingredient;
            } else {
                form.add_ingredient();
            }
        }
        FormField::Ingredient => {
            if form.add_ingredient() {
                app.focused_field = FormField::Quantity;
            }
        }
        FormField::Step => {
            form.add_step();
        }
        FormField::IngredientList | FormField::StepList => app.focus_next_field(),
    }
}

/// The text buffer behind the focused input field, if it is one.
fn focused_buffer(app: &mut App) -> Option<&mut String> {
    let field = app.focused_field;
    let form = app.active_form_mut()?;
    match field {
        FormField::Name => Some(&mut form.name),
        FormField::Quantity => Some(&mut form.quantity),
        FormField::Ingredient => Some(&mut form.ingredient),
        FormField::Step => Some(&mut form.step),
        FormField::IngredientList | FormField::StepList => None,
    }
}
