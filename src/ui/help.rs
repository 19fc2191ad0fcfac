use crate::ui::colors::RosePine;
use crate::ui::components::centered_rect;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "List",
        &[
            ("↑↓ / j k", "Move selection"),
            ("a", "Add a recipe"),
            ("e / ⏎", "Edit the selected recipe"),
            ("u", "Undo the last add or edit"),
            ("/", "Search"),
            ("x", "Clear the search"),
            ("q", "Quit"),
        ],
    ),
    (
        "Form",
        &[
            ("Tab / Shift-Tab", "Next / previous field"),
            ("⏎", "Stage ingredient or step"),
            ("↑↓ on a list", "Pick a staged item"),
            ("Del / ⌫ on a list", "Remove it"),
            ("Ctrl-S", "Submit or save"),
            ("Esc", "Close the form"),
        ],
    ),
];

pub fn render(frame: &mut Frame) {
    let mut lines = Vec::new();
    for (section, bindings) in BINDINGS {
        lines.push(Line::from(Span::styled(
            *section,
            Style::default().fg(RosePine::IRIS).bold(),
        )));
        for (keys, action) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<20}", keys), Style::default().fg(RosePine::GOLD)),
                Span::styled(*action, Style::default().fg(RosePine::TEXT)),
            ]));
        }
        lines.push(Line::default());
    }

    let area = centered_rect(frame.area(), 56, lines.len() as u16 + 2);
    Clear.render(area, frame.buffer_mut());
    Paragraph::new(lines)
        .block(
            Block::bordered()
                .title(" Help ")
                .title_alignment(Alignment::Center)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(RosePine::IRIS))
                .style(Style::default().bg(RosePine::SURFACE)),
        )
        .render(area, frame.buffer_mut());
}
