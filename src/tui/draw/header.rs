//! Header: logo, conversation count, session label, model name.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use std::sync::OnceLock;
use std::time::Instant;

use super::super::app::{App, DisplayMessage};
use super::super::constants::{LOGO_IDLE, LOGO_THINKING};
use super::super::text::truncate_with_ellipsis;

/// Start time for header animation phase (thinking spinner).
static HEADER_START: OnceLock<Instant> = OnceLock::new();

/// Max width for model name in header; longer names are truncated with "…".
const MODEL_HEADER_WIDTH: u16 = 32;

fn is_thinking(app: &App) -> bool {
    matches!(app.messages.last(), Some(DisplayMessage::Thinking))
}

pub(crate) fn draw_header(f: &mut Frame, app: &App, area: Rect, accent: Color) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(8),
            Constraint::Min(0),
            Constraint::Length(MODEL_HEADER_WIDTH),
        ])
        .split(area);
    let logo_area = header_chunks[0];
    let title_area = header_chunks[1];
    let model_area = header_chunks[2];

    let logo_symbol = if is_thinking(app) {
        let start = HEADER_START.get_or_init(Instant::now);
        let phase = start.elapsed().as_millis() as usize;
        LOGO_THINKING[(phase / 80) % LOGO_THINKING.len()]
    } else {
        LOGO_IDLE
    };
    let logo_line = Line::from(vec![
        Span::styled(format!("{} ", logo_symbol), Style::default().fg(accent)),
        Span::styled(
            format!("{} ", app.history.sessions().len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(logo_line), logo_area);

    let title = match &app.save_error {
        Some(err) => Line::from(Span::styled(
            truncate_with_ellipsis(&format!("History not saved: {}", err), title_area.width as usize),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            truncate_with_ellipsis(
                app.session_label().unwrap_or("New chat"),
                title_area.width as usize,
            ),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
    };
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), title_area);

    let model_line = Line::from(Span::styled(
        truncate_with_ellipsis(&app.model_name, MODEL_HEADER_WIDTH as usize),
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(
        Paragraph::new(model_line).alignment(Alignment::Right),
        model_area,
    );
}
