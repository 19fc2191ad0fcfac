//! UI Components and Layout Module
//!
//! Reusable pieces shared by the recipe screens.
//!
//! # Components
//!
//! - **Bottom Navigation Bar**: location on the left, keyboard shortcuts on the right
//! - **Message Line**: the current error, warning or confirmation
//! - **Centered Dialog Area**: placement for the form and help overlays

use crate::app::{App, InputMode};
use crate::models::PendingUndo;
use crate::ui::colors::RosePine;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};

/// Renders the bottom navigation bar with breadcrumbs and keyboard shortcuts
pub fn render_bottom_bar(frame: &mut Frame, area: Rect, app: &App) {
    let navbar_chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(2)]).split(area);

    let left_content = Paragraph::new(get_breadcrumbs(app))
        .alignment(Alignment::Left)
        .style(Style::default().fg(RosePine::SUBTLE))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(RosePine::BORDER)),
        );

    let right_content = Paragraph::new(get_context_shortcuts(app))
        .alignment(Alignment::Right)
        .style(Style::default().fg(RosePine::MUTED))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(RosePine::BORDER)),
        );

    left_content.render(navbar_chunks[0], frame.buffer_mut());
    right_content.render(navbar_chunks[1], frame.buffer_mut());
}

fn get_context_shortcuts(app: &App) -> String {
    let undo_hint = match app.pending_undo {
        PendingUndo::PendingAdd(_) => " [u] Undo add │",
        PendingUndo::PendingEdit(..) => " [u] Undo edit │",
        PendingUndo::NoPendingUndo => "",
    };

    match app.input_mode {
        InputMode::Search => " [type] Filter │ [⏎/Esc] Done ".to_string(),
        InputMode::AddForm => {
            " [Tab] Next field │ [⏎] Stage │ [Del] Remove │ [^S] Submit │ [Esc] Close ".to_string()
        }
        InputMode::EditForm => {
            " [Tab] Next field │ [⏎] Stage │ [Del] Remove │ [^S] Save │ [Esc] Cancel ".to_string()
        }
        InputMode::HelpMenu => " [?/Esc] Close help ".to_string(),
        InputMode::Normal => {
            let search_hint = if app.search.is_active() {
                " [x] Clear search │"
            } else {
                ""
            };
            format!(
                "{}{} [a] Add │ [e] Edit │ [/] Search │ [?] Help │ [q] Quit ",
                undo_hint, search_hint
            )
        }
    }
}

fn get_breadcrumbs(app: &App) -> Line<'static> {
    let mut spans = vec![Span::styled(
        " 󰋜 Recipes ",
        Style::default().fg(RosePine::BASE).bg(RosePine::IRIS),
    )];

    let section = match (&app.input_mode, &app.edit) {
        (InputMode::AddForm, _) => Some("New recipe".to_string()),
        (InputMode::EditForm, Some(session)) => Some(format!("Editing #{}", session.index + 1)),
        (InputMode::Search, _) => Some("Search".to_string()),
        (InputMode::HelpMenu, _) => Some("Help".to_string()),
        _ => None,
    };

    if let Some(section) = section {
        spans.push(Span::styled(" ❯ ", Style::default().fg(RosePine::MUTED)));
        spans.push(Span::styled(
            format!(" {} ", section),
            Style::default().fg(RosePine::BASE).bg(RosePine::LOVE),
        ));
    }

    Line::from(spans)
}

/// One line of status: error first, then warning, then confirmation.
pub fn render_message_line(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(error) = &app.error_message {
        Line::from(Span::styled(
            format!(" ✗ {}", error),
            Style::default().fg(RosePine::LOVE).bold(),
        ))
    } else if let Some(warning) = &app.warning_message {
        Line::from(Span::styled(
            format!(" ⚠ {}", warning),
            Style::default().fg(RosePine::GOLD),
        ))
    } else if let Some(success) = &app.success_message {
        let mut spans = vec![Span::styled(
            format!(" ✓ {}", success),
            Style::default().fg(RosePine::FOAM),
        )];
        if app.pending_undo.is_pending() {
            spans.push(Span::styled(
                "  press [u] to undo",
                Style::default().fg(RosePine::MUTED).italic(),
            ));
        }
        Line::from(spans)
    } else if let Some(message) = &app.search.message {
        Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(RosePine::SUBTLE),
        ))
    } else {
        Line::default()
    };

    Paragraph::new(line).render(area, frame.buffer_mut());
}

/// A `width` x `height` rectangle centered in `area`, clipped to it.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_rect(area, 20, 4), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_rect(area, 80, 40), area);
    }
}
