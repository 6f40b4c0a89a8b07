mod board;
mod footer;
mod log;
mod modals;

use self::log::log;
use super::*;
use crate::state::{Mode, State};
use crate::ui::widgets::styling;
use board::board;
use footer::footer;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the whole screen according to state.
///
pub fn render(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    let show_search = state.mode() == Mode::Search || !state.search_query().is_empty();

    let mut constraints = vec![];
    if show_search {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(5));
    if state.show_log() {
        constraints.push(Constraint::Length(10));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    let mut next = 0;
    if show_search {
        search(frame, chunks[next], state);
        next += 1;
    }
    board(frame, chunks[next], state);
    next += 1;
    if state.show_log() {
        log(frame, chunks[next], state);
        next += 1;
    }
    footer(frame, chunks[next], state);

    match state.mode() {
        Mode::Compose => modals::composer(frame, size, state),
        Mode::ConfirmDelete => modals::confirm_delete(frame, size, state),
        Mode::Board | Mode::Search => (),
    }
}

fn search(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let active = state.mode() == Mode::Search;
    let cursor = if active { "_" } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Search ")
        .border_style(if active {
            styling::active_block_border_style(theme)
        } else {
            styling::normal_block_border_style(theme)
        });
    let line = Line::from(vec![
        Span::styled(state.search_query().to_string(), styling::normal_text_style(theme)),
        Span::styled(cursor, Style::default().fg(theme.accent.to_color())),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), size);
}
