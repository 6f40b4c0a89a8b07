use super::Frame;
use crate::state::{ComposerTarget, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render the task composer over the board.
///
pub fn composer(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme().clone();
    let area = centered_rect(60, 30, size);
    let composer = match state.composer_mut() {
        Some(composer) => composer,
        None => return,
    };
    let title = match composer.target() {
        ComposerTarget::Create(_) => " New card ",
        ComposerTarget::Edit(_) => " Edit card ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, styling::active_block_title_style()))
        .border_style(styling::active_block_border_style(&theme));
    let textarea = composer.textarea_mut();
    textarea.set_block(block);
    textarea.set_style(styling::normal_text_style(&theme));

    frame.render_widget(Clear, area);
    frame.render_widget(textarea.widget(), area);
}

/// Render the delete confirmation over the board.
///
pub fn confirm_delete(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let content = state
        .delete_confirmation()
        .and_then(|(_, task_id)| state.board().task(task_id))
        .map(|task| task.content.clone())
        .unwrap_or_default();
    let area = centered_rect(50, 25, size);
    let text = vec![
        Line::from(Span::styled("Delete this card?", styling::active_block_title_style())),
        Line::from(""),
        Line::from(Span::styled(content, styling::normal_text_style(theme))),
        Line::from(""),
        Line::from(Span::styled("y: delete, n: keep", styling::muted_text_style(theme))),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Delete ")
                .border_style(ratatui::style::Style::default().fg(theme.error.to_color())),
        );
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

/// Return a rectangle centered in `r` taking the given percentages.
///
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
