//! TUI rendering: layout and widgets for the chat interface.

mod header;
mod history;
mod history_selector_popup;
mod input;
mod model_selector_popup;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

use super::app::App;
use super::constants::{ACCENT, INPUT_HEIGHT};

pub(super) fn draw(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);
    header::draw_header(f, app, chunks[0], ACCENT);
    history::draw_history(f, app, chunks[1]);
    input::draw_input(f, app, chunks[2]);
    input::draw_bottom_bar(f, app, chunks[3]);

    if let Some(ref mut selector) = app.model_selector {
        model_selector_popup::draw_model_selector_popup(
            f,
            area,
            selector,
            &app.catalog,
            &app.model_id,
        );
    }
    if let Some(ref mut selector) = app.history_selector {
        history_selector_popup::draw_history_selector_popup(
            f,
            area,
            selector,
            app.history.sessions(),
        );
    }
}

/// Centered rectangle taking the given percentages of `area`.
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let vertical_areas = vertical.split(area);
    let horizontal_areas = horizontal.split(vertical_areas[0]);
    horizontal_areas[0]
}
