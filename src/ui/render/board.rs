use super::Frame;
use crate::board::{Column, Task};
use crate::state::{BoardLayout, CardLayout, ColumnLayout, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the columns of the board side by side and record where every
/// column and card ended up.
///
pub fn board(frame: &mut Frame, size: Rect, state: &mut State) {
    let columns: Vec<Column> = state.board().ordered_columns().cloned().collect();
    if columns.is_empty() {
        let text = Paragraph::new("No columns")
            .block(Block::default().borders(Borders::ALL).title("Board"))
            .alignment(Alignment::Center);
        frame.render_widget(text, size);
        state.set_layout(BoardLayout::default());
        return;
    }

    let constraints: Vec<Constraint> = columns
        .iter()
        .map(|_| Constraint::Ratio(1, columns.len() as u32))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(size);

    let mut layout = BoardLayout::default();
    for (idx, column) in columns.iter().enumerate() {
        layout.columns.push(render_column(frame, chunks[idx], column, idx, state));
    }
    state.set_layout(layout);
}

fn render_column(frame: &mut Frame, size: Rect, column: &Column, idx: usize, state: &State) -> ColumnLayout {
    let theme = state.theme();
    let tasks = state.visible_tasks(&column.id);
    let is_selected = idx == state.selected_column_index();

    let title = if state.search_query().trim().is_empty() {
        format!(" {} ({}) ", column.title, column.task_ids.len())
    } else {
        format!(" {} ({}/{}) ", column.title, tasks.len(), column.task_ids.len())
    };
    let border_style = if state.is_column_hovered(&column.id) {
        styling::drop_target_border_style(theme)
    } else if is_selected {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    };
    let title_style = if is_selected {
        styling::active_block_title_style()
    } else {
        styling::normal_text_style(theme)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, title_style))
        .border_style(border_style);
    let list_area = block.inner(size);
    frame.render_widget(block, size);

    if tasks.is_empty() {
        let hint = Paragraph::new("No tasks")
            .alignment(Alignment::Center)
            .style(styling::muted_text_style(theme));
        frame.render_widget(hint, list_area);
    }

    let selected_slot = if is_selected {
        Some(state.selected_task_index())
    } else {
        None
    };
    let heights: Vec<u16> = tasks
        .iter()
        .map(|task| card_height(&task.content, list_area.width))
        .collect();
    let first = first_visible(&heights, selected_slot, list_area.height);

    let mut cards = vec![];
    let mut y = list_area.y;
    let bottom = list_area.y.saturating_add(list_area.height);
    for (slot, task) in tasks.iter().enumerate().skip(first) {
        let height = heights[slot];
        if y.saturating_add(height) > bottom {
            break;
        }
        let area = Rect::new(list_area.x, y, list_area.width, height);
        render_card(frame, area, task, selected_slot == Some(slot), state);
        cards.push(CardLayout {
            task_id: task.id.clone(),
            area,
        });
        y += height;
    }

    ColumnLayout {
        column_id: column.id.clone(),
        area: size,
        cards,
    }
}

fn render_card(frame: &mut Frame, size: Rect, task: &Task, is_selected: bool, state: &State) {
    let theme = state.theme();
    let is_dragged = state
        .drag_session()
        .map_or(false, |session| session.task_id == task.id);
    let style = if is_dragged {
        styling::dragged_card_style(theme)
    } else if is_selected {
        styling::selected_card_style(theme)
    } else {
        styling::normal_text_style(theme)
    };
    let (text, style) = if task.content.trim().is_empty() {
        ("(empty)", styling::muted_text_style(theme))
    } else {
        (task.content.as_str(), style)
    };
    let card = Paragraph::new(text).style(style).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if is_selected {
                styling::active_block_border_style(theme)
            } else {
                styling::normal_block_border_style(theme)
            }),
    );
    frame.render_widget(card, size);
}

/// Rows a card needs: its wrapped text plus the border.
///
fn card_height(content: &str, width: u16) -> u16 {
    let inner = usize::from(width.saturating_sub(2).max(1));
    let rows: usize = content.lines().map(|line| wrapped_rows(line, inner)).sum();
    u16::try_from(rows.max(1)).unwrap_or(u16::MAX).saturating_add(2)
}

/// Rows one line takes when wrapped at word boundaries, the way the card
/// paragraph wraps it. Words wider than a row are broken across rows.
///
fn wrapped_rows(line: &str, width: usize) -> usize {
    let mut rows = 1;
    let mut used = 0;
    for word in line.split_whitespace() {
        let mut len = word.chars().count();
        let needed = if used == 0 { len } else { used + 1 + len };
        if needed <= width {
            used = needed;
            continue;
        }
        if used > 0 {
            rows += 1;
        }
        while len > width {
            rows += 1;
            len -= width;
        }
        used = len;
    }
    rows
}

/// First card to draw so the selected one fits in the list area.
///
fn first_visible(heights: &[u16], selected: Option<usize>, available: u16) -> usize {
    let selected = match selected {
        Some(selected) if selected < heights.len() => selected,
        _ => return 0,
    };
    let mut first = 0;
    let mut used: u16 = heights[..=selected].iter().sum();
    while used > available && first < selected {
        used -= heights[first];
        first += 1;
    }
    first
}
