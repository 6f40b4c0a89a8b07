use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render the most recent log lines that fit.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let block = Block::default()
        .title(" Log (` to hide) ")
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));
    let rows = usize::from(block.inner(size).height);
    let items: Vec<ListItem> = state
        .logs()
        .tail(rows)
        .into_iter()
        .map(|entry| ListItem::new(Line::from(Span::styled(entry, styling::normal_text_style(theme)))))
        .collect();
    frame.render_widget(List::new(items).block(block), size);
}
