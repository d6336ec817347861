//! Transcript: bordered message blocks, notices, and scrollbar.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use super::super::app::{App, DisplayMessage};
use super::super::constants::ACCENT_SECONDARY;
use super::super::text::wrap_message;

fn repeat_char(c: char, n: usize) -> String {
    std::iter::repeat_n(c, n).collect()
}

/// Add a User or Assistant block: top border with label, wrapped content, bottom border.
fn add_message_block(
    lines: &mut Vec<Line<'static>>,
    label: &str,
    content: &str,
    is_user: bool,
    wrap_width: usize,
) {
    let border_style = Style::default().fg(if is_user {
        Color::DarkGray
    } else {
        ACCENT_SECONDARY
    });
    let content_width = wrap_width.saturating_sub(5);

    let top_label = format!("┌─ {} ", label);
    let trail = wrap_width.saturating_sub(top_label.chars().count() + 1);
    lines.push(Line::from(Span::styled(
        format!("{}{}┐", top_label, repeat_char('─', trail)),
        border_style,
    )));
    for chunk in wrap_message(content.trim(), content_width) {
        lines.push(Line::from(vec![
            Span::styled("│ ", border_style),
            Span::raw("  "),
            Span::raw(chunk),
        ]));
    }
    lines.push(Line::from(Span::styled(
        format!("└{}┘", repeat_char('─', wrap_width.saturating_sub(2))),
        border_style,
    )));
}

fn transcript_lines(messages: &[DisplayMessage], wrap_width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for msg in messages {
        match msg {
            DisplayMessage::User(s) => add_message_block(&mut lines, "You", s, true, wrap_width),
            DisplayMessage::Assistant(s) => {
                add_message_block(&mut lines, "Assistant", s, false, wrap_width)
            }
            DisplayMessage::Thinking => lines.push(Line::from(Span::styled(
                "  Thinking... ",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))),
            DisplayMessage::Notice(s) => {
                let color = if s.starts_with("Error") {
                    Color::Red
                } else {
                    Color::DarkGray
                };
                for chunk in wrap_message(s, wrap_width.saturating_sub(2)) {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", chunk),
                        Style::default().fg(color),
                    )));
                }
            }
        }
    }
    lines
}

pub(crate) fn draw_history(f: &mut Frame, app: &mut App, history_area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(history_area);
    let text_area = chunks[0];
    let scrollbar_area = chunks[1];

    let lines = transcript_lines(&app.messages, text_area.width as usize);
    let total_lines = lines.len();
    let visible = text_area.height as usize;
    app.last_max_scroll = total_lines.saturating_sub(visible.max(1));
    let scroll_pos = app.scroll_line();
    let visible_lines: Vec<Line> = lines.into_iter().skip(scroll_pos).take(visible).collect();
    f.render_widget(Paragraph::new(visible_lines), text_area);

    let mut scrollbar_state = ScrollbarState::default()
        .position(scroll_pos)
        .content_length(total_lines);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .thumb_symbol("█")
        .thumb_style(Style::default().fg(ACCENT_SECONDARY))
        .track_symbol(Some("│"));
    f.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
}
