//! Recipe List UI Module
//!
//! The main screen: search bar on top, the filtered-or-full recipe list on
//! the left, the highlighted recipe on the right.

use crate::app::{App, InputMode};
use crate::models::Recipe;
use crate::ui::colors::RosePine;
use crate::ui::components::{render_bottom_bar, render_message_line};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, List, ListItem, ListState, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Main rendering function for the recipe screen
pub fn render(frame: &mut Frame, app: &App) {
    let main_area = frame.area();

    let block = Block::bordered()
        .title(" recipebox ")
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::BORDER));

    let inner_area = block.inner(main_area);
    block.render(main_area, frame.buffer_mut());

    let chunks = Layout::vertical([
        Constraint::Length(3), // Search bar
        Constraint::Fill(1),   // List + details
        Constraint::Length(1), // Message line
        Constraint::Length(3), // Bottom navigation bar
    ])
    .split(inner_area);

    let body = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_search_bar(frame, chunks[0], app);
    render_list(frame, body[0], app);
    render_details(frame, body[1], app);
    render_message_line(frame, chunks[2], app);
    render_bottom_bar(frame, chunks[3], app);
}

fn render_search_bar(frame: &mut Frame, area: Rect, app: &App) {
    let searching = app.input_mode == InputMode::Search;
    let border = if searching {
        RosePine::IRIS
    } else {
        RosePine::BORDER
    };

    let text = if app.search.query.is_empty() && !searching {
        Span::styled(
            " Press / to search names, ingredients and steps",
            Style::default().fg(RosePine::MUTED).italic(),
        )
    } else {
        Span::styled(
            format!(" {}", app.search.query),
            Style::default().fg(RosePine::GOLD).bold(),
        )
    };

    Paragraph::new(Line::from(text))
        .block(
            Block::bordered()
                .title(" Search ")
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border)),
        )
        .render(area, frame.buffer_mut());

    if searching {
        frame.set_cursor_position(Position {
            x: area.x + 2 + app.search.query.width() as u16,
            y: area.y + 1,
        });
    }
}

fn render_list(frame: &mut Frame, area: Rect, app: &App) {
    let visible = app.visible_recipes();
    let title = if app.search.is_active() {
        format!(" Recipes ({} of {}) ", visible.len(), app.store.len())
    } else {
        format!(" Recipes ({}) ", app.store.len())
    };

    let block = Block::bordered()
        .title(title)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(RosePine::BORDER));

    if visible.is_empty() {
        let hint = if app.search.is_active() {
            "Nothing matches. Press x to clear the search."
        } else {
            "No recipes yet. Press a to add one."
        };
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .style(Style::default().fg(RosePine::MUTED))
            .block(block)
            .render(area, frame.buffer_mut());
        return;
    }

    let name_width = area.width.saturating_sub(10) as usize;
    let editing = app.edit.as_ref().map(|session| session.index);
    let items: Vec<ListItem> = visible
        .iter()
        .map(|(index, recipe)| {
            let marker = if editing == Some(*index) { "✎" } else { " " };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>3}. ", index + 1),
                    Style::default().fg(RosePine::MUTED),
                ),
                Span::styled(
                    truncate(&recipe.name, name_width),
                    Style::default().fg(RosePine::TEXT),
                ),
                Span::styled(format!(" {}", marker), Style::default().fg(RosePine::LOVE)),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(RosePine::LOVE)
            .bg(RosePine::ROW_HIGHLIGHT)
            .bold(),
    );

    let mut state = ListState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_details(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::bordered()
        .title(" Details ")
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(RosePine::BORDER));

    let lines = match app.selected_recipe() {
        Some(recipe) => recipe_lines(recipe),
        None => vec![Line::from(Span::styled(
            "Select a recipe to see it here",
            Style::default().fg(RosePine::MUTED),
        ))],
    };

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block)
        .render(area, frame.buffer_mut());
}

fn recipe_lines(recipe: &Recipe) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            recipe.name.clone(),
            Style::default().fg(RosePine::IRIS).bold(),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Ingredients",
            Style::default().fg(RosePine::SUBTLE).underlined(),
        )),
    ];

    for ingredient in &recipe.ingredients {
        let mut spans = vec![Span::raw("  • ")];
        if !ingredient.quantity.is_empty() {
            spans.push(Span::styled(
                format!("{} ", ingredient.quantity),
                Style::default().fg(RosePine::GOLD),
            ));
        }
        spans.push(Span::styled(
            ingredient.name.clone(),
            Style::default().fg(RosePine::TEXT),
        ));
        lines.push(Line::from(spans));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Steps",
        Style::default().fg(RosePine::SUBTLE).underlined(),
    )));
    for (i, step) in recipe.steps.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}. ", i + 1), Style::default().fg(RosePine::MUTED)),
            Span::styled(step.clone(), Style::default().fg(RosePine::TEXT)),
        ]));
    }

    lines
}

/// Cuts `text` to at most `max` terminal columns, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_display_width() {
        assert_eq!(truncate("Tea", 10), "Tea");
        assert_eq!(truncate("Lemon drizzle cake", 8), "Lemon d…");
        assert_eq!(truncate("抹茶ラテ", 5), "抹茶…");
        assert_eq!(truncate("abc", 0), "");
    }
}
