use super::Frame;
use crate::state::{Mode, State};
use crate::ui::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Return the mode label and key hints for the footer.
///
fn hints(state: &State) -> (&'static str, &'static str) {
    if state.is_dragging() {
        return ("DRAG", " release over a column: drop, Esc: cancel");
    }
    match state.mode() {
        Mode::Board => (
            "BOARD",
            " h/l j/k: select, H/L J/K: move, n: new, e: edit, d: delete, /: search, t: theme, `: log, q: quit",
        ),
        Mode::Search => ("SEARCH", " type to filter, Enter: keep, Esc: clear"),
        Mode::Compose => ("COMPOSE", " Enter: save, Esc: cancel"),
        Mode::ConfirmDelete => ("DELETE", " y: delete, n/Esc: keep"),
    }
}

fn mode_color(state: &State, theme: &Theme) -> ratatui::style::Color {
    if state.is_dragging() {
        return theme.footer_drag.to_color();
    }
    match state.mode() {
        Mode::Board => theme.footer_board.to_color(),
        Mode::Search => theme.footer_search.to_color(),
        Mode::Compose => theme.footer_compose.to_color(),
        Mode::ConfirmDelete => theme.footer_delete.to_color(),
    }
}

/// Render footer with the mode, key hints and the latest status message.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let (label, hint) = hints(state);
    let mut spans = vec![
        Span::styled(
            format!(" {} ", label),
            Style::default()
                .fg(theme.background.to_color())
                .bg(mode_color(state, theme))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(hint, Style::default().fg(theme.text_muted.to_color())),
    ];
    if let Some(status) = state.status() {
        spans.push(Span::styled(
            format!("  {}", status),
            Style::default().fg(theme.warning.to_color()),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), size);
}
