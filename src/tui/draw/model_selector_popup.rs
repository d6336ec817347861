//! Model selector popup (Alt+M): ranked, highlighted catalog search.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};

use crate::core::catalog::{ModelDescriptor, format_context};
use crate::core::search::{self, Palette, ScoredModel};

use super::super::app::ModelSelectorState;
use super::super::constants::ACCENT;
use super::super::text::highlighted_spans;
use super::popup_area;

/// One list row: marker, priority, highlighted name and id, context length.
fn model_row(
    scored: &ScoredModel<'_>,
    query: &str,
    palette: &Palette,
    current_model: &str,
) -> Line<'static> {
    let model = scored.model;
    let marker = if model.model_string_for_api == current_model {
        "* "
    } else {
        "  "
    };
    let priority = if scored.priority.is_zero() {
        "    ".to_string()
    } else {
        format!("{:>4}", scored.priority.to_string())
    };
    let mut spans = vec![
        Span::styled(marker, Style::default().fg(ACCENT)),
        Span::styled(priority, Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
    ];
    spans.extend(highlighted_spans(
        &model.model_name,
        query,
        palette,
        Style::default().add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw("  "));
    spans.extend(highlighted_spans(
        &model.model_string_for_api,
        query,
        palette,
        Style::default().fg(Color::DarkGray),
    ));
    spans.push(Span::styled(
        format!("  {}", format_context(model.context_length)),
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}

pub(crate) fn draw_model_selector_popup(
    f: &mut Frame,
    area: Rect,
    selector: &mut ModelSelectorState,
    catalog: &[ModelDescriptor],
    current_model: &str,
) {
    let popup_rect = popup_area(area, 70, 60);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Select model (Alt+M) ");

    let inner = block.inner(popup_rect);
    f.render_widget(Clear, popup_rect);
    f.render_widget(block, popup_rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);
    let query_area = chunks[0];
    let list_area = chunks[1];
    let hint_area = chunks[2];

    let query_content = if selector.query.is_empty() {
        Span::styled("Search models... ", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(selector.query.as_str())
    };
    let query_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let query_inner = query_block.inner(query_area);
    f.render_widget(
        Paragraph::new(Line::from(query_content))
            .block(query_block)
            .style(Style::default().fg(Color::White)),
        query_area,
    );
    let cx = query_inner.x
        + selector
            .query
            .chars()
            .count()
            .min(query_inner.width as usize) as u16;
    f.set_cursor_position(Position::new(cx, query_inner.y));

    let ranked = search::rank(catalog, &selector.query);
    selector.selected_index = selector.selected_index.min(ranked.len().saturating_sub(1));

    if ranked.is_empty() {
        let msg = if catalog.is_empty() {
            "No models"
        } else {
            "No models match"
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                msg,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))),
            list_area,
        );
    } else {
        let palette = Palette::default();
        let items: Vec<ListItem> = ranked
            .iter()
            .map(|s| ListItem::new(model_row(s, &selector.query, &palette, current_model)))
            .collect();
        selector.list_state.select(Some(selector.selected_index));
        let list = List::new(items).highlight_style(Style::default().bg(Color::Rgb(40, 40, 40)));
        f.render_stateful_widget(list, list_area, &mut selector.list_state);
    }

    let hint = match selector.error {
        Some(ref err) => Line::from(Span::styled(
            format!("Error: {}", err),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(vec![
            Span::styled("↑↓ ", Style::default().fg(Color::DarkGray)),
            Span::raw("select  "),
            Span::styled("Enter ", Style::default().fg(Color::DarkGray)),
            Span::raw("confirm  "),
            Span::styled("Esc ", Style::default().fg(Color::DarkGray)),
            Span::raw("cancel  "),
            Span::styled("type ", Style::default().fg(Color::DarkGray)),
            Span::raw("search"),
        ]),
    };
    f.render_widget(Paragraph::new(hint), hint_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::test_support::catalog;

    #[test]
    fn row_marks_current_model_and_shows_priority() {
        let catalog = catalog();
        let ranked = search::rank(&catalog, "mini");
        let line = model_row(&ranked[0], "mini", &Palette::default(), "gpt-4o-mini");
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with("* "));
        assert!(text.contains("GPT-4o Mini"));
        assert!(text.contains("gpt-4o-mini"));
        assert!(text.contains(&ranked[0].priority.to_string()));
    }

    #[test]
    fn empty_query_hides_priority() {
        let catalog = catalog();
        let ranked = search::rank(&catalog, "");
        let line = model_row(&ranked[0], "", &Palette::default(), "other");
        assert_eq!(line.spans[0].content, "  ");
        assert_eq!(line.spans[1].content, "    ");
    }
}
