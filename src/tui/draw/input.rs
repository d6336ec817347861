//! Input box and bottom bar.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::super::app::App;
use super::super::constants::ACCENT;
use super::super::shortcuts::labels;

pub(crate) fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let border = if app.is_waiting {
        Color::DarkGray
    } else {
        ACCENT
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);

    // Keep the tail of long input visible.
    let width = inner.width as usize;
    let count = app.input.chars().count();
    let visible: String = app
        .input
        .chars()
        .skip(count.saturating_sub(width.saturating_sub(1)))
        .collect();
    let content = if app.input.is_empty() {
        Line::from(Span::styled(
            "Ask anything...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::raw(visible.clone()))
    };
    f.render_widget(Paragraph::new(content).block(block), area);

    if app.model_selector.is_none() && app.history_selector.is_none() {
        let cx = inner.x + visible.chars().count().min(width) as u16;
        f.set_cursor_position(Position::new(cx, inner.y));
    }
}

pub(crate) fn draw_bottom_bar(f: &mut Frame, app: &App, area: Rect) {
    f.render_widget(
        Paragraph::new(labels::bottom_bar(app.is_waiting)).alignment(Alignment::Right),
        area,
    );
}
