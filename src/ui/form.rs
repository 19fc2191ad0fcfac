//! Add/Edit form overlay.

use crate::app::{App, FormField, InputMode};
use crate::models::RecipeForm;
use crate::ui::colors::RosePine;
use crate::ui::components::centered_rect;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, List, ListItem, ListState, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, app: &App) {
    let Some(form) = app.active_form() else {
        return;
    };

    let title = match (&app.input_mode, &app.edit) {
        (InputMode::EditForm, Some(session)) => format!(" Edit recipe #{} ", session.index + 1),
        _ => " New recipe ".to_string(),
    };

    let dialog = centered_rect(frame.area(), 70, 26);
    Clear.render(dialog, frame.buffer_mut());

    let block = Block::bordered()
        .title(title)
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(RosePine::IRIS))
        .style(Style::default().bg(RosePine::SURFACE));
    let inner = block.inner(dialog);
    block.render(dialog, frame.buffer_mut());

    let rows = Layout::vertical([
        Constraint::Length(3), // Name
        Constraint::Length(3), // Quantity + ingredient
        Constraint::Fill(1),   // Staged ingredients
        Constraint::Length(3), // Step
        Constraint::Fill(1),   // Staged steps
        Constraint::Length(1), // Error
    ])
    .split(inner);

    let ingredient_row =
        Layout::horizontal([Constraint::Length(16), Constraint::Fill(1)]).split(rows[1]);

    let fields = [
        (FormField::Name, "Name", form.name.as_str(), rows[0]),
        (FormField::Quantity, "Qty", form.quantity.as_str(), ingredient_row[0]),
        (
            FormField::Ingredient,
            "Ingredient",
            form.ingredient.as_str(),
            ingredient_row[1],
        ),
        (FormField::Step, "Step", form.step.as_str(), rows[3]),
    ];
    for (field, label, value, area) in fields {
        render_input(frame, area, label, value, app.focused_field == field);
    }

    render_staged_ingredients(frame, rows[2], form, app);
    render_staged_steps(frame, rows[4], form, app);

    if let Some(error) = &app.error_message {
        Paragraph::new(Span::styled(
            format!(" {}", error),
            Style::default().fg(RosePine::LOVE).bold(),
        ))
        .render(rows[5], frame.buffer_mut());
    }
}

fn field_block(label: &str, focused: bool) -> Block<'static> {
    let color = if focused {
        RosePine::LOVE
    } else {
        RosePine::BORDER
    };
    Block::bordered()
        .title(format!(" {} ", label))
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn render_input(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    Paragraph::new(format!(" {}", value))
        .style(Style::default().fg(RosePine::TEXT))
        .block(field_block(label, focused))
        .render(area, frame.buffer_mut());

    if focused {
        let max_x = area.x + area.width.saturating_sub(2);
        frame.set_cursor_position(Position {
            x: (area.x + 2 + value.width() as u16).min(max_x),
            y: area.y + 1,
        });
    }
}

fn render_staged_ingredients(frame: &mut Frame, area: Rect, form: &RecipeForm, app: &App) {
    let items = form
        .ingredients
        .iter()
        .map(|ingredient| {
            let mut spans = vec![Span::raw(" • ")];
            if !ingredient.quantity.is_empty() {
                spans.push(Span::styled(
                    format!("{} ", ingredient.quantity),
                    Style::default().fg(RosePine::GOLD),
                ));
            }
            spans.push(Span::raw(ingredient.name.clone()));
            ListItem::new(Line::from(spans))
        })
        .collect();
    let title = format!("Ingredients ({})", form.ingredients.len());
    render_staged(frame, area, &title, items, app, FormField::IngredientList);
}

fn render_staged_steps(frame: &mut Frame, area: Rect, form: &RecipeForm, app: &App) {
    let items = form
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| ListItem::new(format!(" {}. {}", i + 1, step)))
        .collect();
    let title = format!("Steps ({})", form.steps.len());
    render_staged(frame, area, &title, items, app, FormField::StepList);
}

fn render_staged(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: Vec<ListItem<'static>>,
    app: &App,
    field: FormField,
) {
    let focused = app.focused_field == field;
    let list = List::new(items)
        .style(Style::default().fg(RosePine::TEXT))
        .block(field_block(title, focused))
        .highlight_style(Style::default().bg(RosePine::ROW_HIGHLIGHT).fg(RosePine::LOVE));

    let mut state = ListState::default();
    if focused && field.is_list() {
        state.select(Some(app.selected_staged));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
