//! History selector popup (Alt+H).

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};

use crate::core::history::{ChatSession, filter_sessions};

use super::super::app::HistorySelectorState;
use super::super::constants::ACCENT;
use super::popup_area;

fn format_session(session: &ChatSession) -> String {
    use chrono::TimeZone;
    let date_str = chrono::Local
        .timestamp_opt(session.updated_at as i64, 0)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| session.updated_at.to_string());
    format!("{}  {}", session.label, date_str)
}

pub(crate) fn draw_history_selector_popup(
    f: &mut Frame,
    area: Rect,
    selector: &mut HistorySelectorState,
    sessions: &[ChatSession],
) {
    let popup_rect = popup_area(area, 60, 50);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Load conversation (Alt+H) ");

    let inner = block.inner(popup_rect);
    f.render_widget(Clear, popup_rect);
    f.render_widget(block, popup_rect);

    let is_renaming = selector.renaming.is_some();
    let constraints: &[Constraint] = if is_renaming {
        &[
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ]
    } else {
        &[
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);
    let filter_area = chunks[0];
    let (list_area, hint_area) = if let Some((_, ref input)) = selector.renaming {
        let rename_content = Line::from(vec![
            Span::styled("Rename to: ", Style::default().fg(Color::DarkGray)),
            Span::raw(input.clone()),
            Span::styled("_", Style::default().fg(Color::DarkGray)),
        ]);
        let rename_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT));
        f.render_widget(
            Paragraph::new(rename_content)
                .block(rename_block)
                .style(Style::default().fg(Color::White)),
            chunks[1],
        );
        (chunks[2], chunks[3])
    } else {
        (chunks[1], chunks[2])
    };

    let filter_content = if selector.filter.is_empty() {
        Span::styled("Filter... ", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(selector.filter.as_str())
    };
    let filter_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(
        Paragraph::new(Line::from(filter_content))
            .block(filter_block)
            .style(Style::default().fg(Color::White)),
        filter_area,
    );

    let filtered = filter_sessions(sessions, &selector.filter);
    selector.selected_index = selector
        .selected_index
        .min(filtered.len().saturating_sub(1));

    if let Some(ref err) = selector.error {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                err.as_str(),
                Style::default().fg(Color::Red),
            ))),
            list_area,
        );
    } else if filtered.is_empty() {
        let msg = if selector.filter.is_empty() {
            "No conversations yet"
        } else {
            "No conversations match filter"
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                msg,
                Style::default().fg(Color::DarkGray),
            ))),
            list_area,
        );
    } else {
        let items: Vec<ListItem> = filtered
            .iter()
            .map(|s| ListItem::new(format!(" {} ", format_session(s))))
            .collect();
        selector.list_state.select(Some(selector.selected_index));
        let list = List::new(items).highlight_style(Style::default().fg(Color::Black).bg(ACCENT));
        f.render_stateful_widget(list, list_area, &mut selector.list_state);
    }

    let hint = if is_renaming {
        Line::from(vec![
            Span::styled("Enter ", Style::default().fg(Color::DarkGray)),
            Span::raw("confirm  "),
            Span::styled("Esc ", Style::default().fg(Color::DarkGray)),
            Span::raw("cancel "),
        ])
    } else {
        Line::from(vec![
            Span::styled("↑↓ ", Style::default().fg(Color::DarkGray)),
            Span::raw("select  "),
            Span::styled("Enter ", Style::default().fg(Color::DarkGray)),
            Span::raw("load  "),
            Span::styled("Ctrl+R ", Style::default().fg(Color::DarkGray)),
            Span::raw("rename  "),
            Span::styled("Delete/Ctrl+D ", Style::default().fg(Color::DarkGray)),
            Span::raw("delete  "),
            Span::styled("Esc ", Style::default().fg(Color::DarkGray)),
            Span::raw("close"),
        ])
    };
    f.render_widget(Paragraph::new(hint), hint_area);
}
