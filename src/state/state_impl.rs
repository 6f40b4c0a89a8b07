use super::form::{next_task_id, Composer, ComposerTarget};
use super::layout::BoardLayout;
use super::navigation::{Direction, Mode};
use crate::app::ConfigSaveSender;
use crate::board::{filter, BoardError, Board, ColumnId, Intent, Store, Task, TaskId};
use crate::drag::{payload, resolver, DragCoordinator, DragSession, DropResolution, HoverCounter};
use crate::logger::LogBuffer;
use crate::persistence::Saver;
use crate::ui::Theme;
use log::*;
use ratatui::layout::Rect;
use std::collections::HashMap;

/// Houses data representative of application state.
///
pub struct State {
    store: Store,
    saver: Option<Saver>,
    config_save_sender: Option<ConfigSaveSender>,
    drag: DragCoordinator,
    hover: HashMap<ColumnId, HoverCounter>,
    hovered_column: Option<ColumnId>,
    mode: Mode,
    selected_column: usize,
    selected_task: usize,
    search_query: String,
    composer: Option<Composer>,
    delete_confirmation: Option<(ColumnId, TaskId)>,
    layout: BoardLayout,
    status: Option<String>,
    logs: LogBuffer,
    show_log: bool,
    theme: Theme,
    terminal_size: Rect,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            store: Store::default(),
            saver: None,
            config_save_sender: None,
            drag: DragCoordinator::new(),
            hover: HashMap::new(),
            hovered_column: None,
            mode: Mode::Board,
            selected_column: 0,
            selected_task: 0,
            search_query: String::new(),
            composer: None,
            delete_confirmation: None,
            layout: BoardLayout::default(),
            status: None,
            logs: LogBuffer::new(),
            show_log: false,
            theme: Theme::default(),
            terminal_size: Rect::default(),
        }
    }
}

impl State {
    /// Return new state around the given store and collaborators.
    ///
    pub fn new(
        store: Store,
        saver: Option<Saver>,
        config_save_sender: Option<ConfigSaveSender>,
        theme: Theme,
        logs: LogBuffer,
    ) -> Self {
        State {
            store,
            saver,
            config_save_sender,
            theme,
            logs,
            ..State::default()
        }
    }

    pub fn board(&self) -> &Board {
        self.store.board()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn clear_status(&mut self) -> &mut Self {
        self.status = None;
        self
    }

    pub fn logs(&self) -> &LogBuffer {
        &self.logs
    }

    pub fn show_log(&self) -> bool {
        self.show_log
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.show_log = !self.show_log;
        self
    }

    pub fn terminal_size(&self) -> Rect {
        self.terminal_size
    }

    pub fn set_terminal_size(&mut self, size: Rect) -> &mut Self {
        self.terminal_size = size;
        self
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Record the geometry produced by the latest render.
    ///
    pub fn set_layout(&mut self, layout: BoardLayout) -> &mut Self {
        self.layout = layout;
        self
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn composer(&self) -> Option<&Composer> {
        self.composer.as_ref()
    }

    pub fn composer_mut(&mut self) -> Option<&mut Composer> {
        self.composer.as_mut()
    }

    pub fn delete_confirmation(&self) -> Option<&(ColumnId, TaskId)> {
        self.delete_confirmation.as_ref()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.current()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Return true while a drag hovers over the column.
    ///
    pub fn is_column_hovered(&self, column_id: &ColumnId) -> bool {
        self.hover.get(column_id).map_or(false, HoverCounter::is_over)
    }

    /// Apply an intent to the store. Accepted mutations are handed to the
    /// saver; rejected ones leave the board untouched and surface in the
    /// status line. Returns true if the board changed.
    ///
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        let snapshot = match self.store.dispatch(intent) {
            Ok(board) => board.clone(),
            Err(e) => {
                warn!("Board change rejected: {}", e);
                self.status = Some(e.to_string());
                return false;
            }
        };
        if let Some(saver) = &self.saver {
            saver.schedule(snapshot);
        }
        self.clamp_selection();
        true
    }

    /// Return column ids in display order.
    ///
    pub fn column_ids(&self) -> Vec<ColumnId> {
        self.board().ordered_columns().map(|c| c.id.clone()).collect()
    }

    /// Return the ids of the tasks shown for a column under the current
    /// search.
    ///
    pub fn visible_ids(&self, column_id: &ColumnId) -> Vec<TaskId> {
        filter::visible_tasks(self.board(), column_id, &self.search_query)
            .into_iter()
            .map(|task| task.id.clone())
            .collect()
    }

    pub fn visible_tasks(&self, column_id: &ColumnId) -> Vec<&Task> {
        filter::visible_tasks(self.board(), column_id, &self.search_query)
    }

    pub fn selected_column_index(&self) -> usize {
        self.selected_column
    }

    pub fn selected_task_index(&self) -> usize {
        self.selected_task
    }

    pub fn selected_column_id(&self) -> Option<ColumnId> {
        self.column_ids().get(self.selected_column).cloned()
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        let column_id = self.selected_column_id()?;
        self.visible_ids(&column_id).get(self.selected_task).cloned()
    }

    /// Keep the selection inside the board after it or the filter changed.
    ///
    fn clamp_selection(&mut self) {
        let columns = self.column_ids();
        if columns.is_empty() {
            self.selected_column = 0;
            self.selected_task = 0;
            return;
        }
        self.selected_column = self.selected_column.min(columns.len() - 1);
        let visible = self.visible_ids(&columns[self.selected_column]).len();
        self.selected_task = self.selected_task.min(visible.saturating_sub(1));
    }

    fn select_task(&mut self, column_id: &ColumnId, task_id: &TaskId) {
        if let Some(col) = self.column_ids().iter().position(|c| c == column_id) {
            self.selected_column = col;
        }
        if let Some(slot) = self.visible_ids(column_id).iter().position(|t| t == task_id) {
            self.selected_task = slot;
        }
    }

    /// Move the selection one step in the given direction.
    ///
    pub fn navigate(&mut self, direction: Direction) -> &mut Self {
        debug!("Processing navigation '{:?}'...", direction);
        let column_count = self.column_ids().len();
        match direction {
            Direction::Left => self.selected_column = self.selected_column.saturating_sub(1),
            Direction::Right => {
                if self.selected_column + 1 < column_count {
                    self.selected_column += 1;
                }
            }
            Direction::Up => self.selected_task = self.selected_task.saturating_sub(1),
            Direction::Down => self.selected_task += 1,
        }
        self.clamp_selection();
        self
    }

    /// Move the selected card one step. Left/right moves it to the adjacent
    /// column at the same row; up/down reorders it within its column.
    ///
    /// Rows are rendered slots, so the same slot translation and offset
    /// correction as a mouse drop apply.
    ///
    pub fn move_selected(&mut self, direction: Direction) -> bool {
        let (column_id, task_id) = match (self.selected_column_id(), self.selected_task_id()) {
            (Some(column_id), Some(task_id)) => (column_id, task_id),
            _ => return false,
        };
        let source_index = match self.board().column(&column_id).and_then(|c| c.position_of(&task_id)) {
            Some(idx) => idx,
            None => return false,
        };
        let session = DragSession {
            task_id: task_id.clone(),
            source_column_id: column_id.clone(),
            source_index,
        };
        let columns = self.column_ids();
        let slot = self.selected_task;

        let (dest_column_id, raw_slot) = match direction {
            Direction::Up if slot == 0 => return false,
            Direction::Up => (column_id.clone(), slot - 1),
            Direction::Down => (column_id.clone(), slot + 2),
            Direction::Left if self.selected_column == 0 => return false,
            Direction::Left => (columns[self.selected_column - 1].clone(), slot),
            Direction::Right => match columns.get(self.selected_column + 1) {
                Some(dest) => (dest.clone(), slot),
                None => return false,
            },
        };

        let task_ids = match self.board().column(&dest_column_id) {
            Some(column) => column.task_ids.clone(),
            None => return false,
        };
        let rendered = self.visible_ids(&dest_column_id);
        let dest_slot = raw_slot.min(rendered.len());
        if resolver::lands_in_place(&session, &dest_column_id, &rendered, dest_slot) {
            return false;
        }
        let raw_index = filter::slot_to_sequence_index(&task_ids, &rendered, dest_slot);
        match resolver::correct_for_source(&session, &dest_column_id, raw_index) {
            DropResolution::NoOp => false,
            DropResolution::Move { dest_index } => {
                let moved = self.dispatch(Intent::MoveTask {
                    task_id: task_id.clone(),
                    source_column_id: column_id,
                    source_index,
                    dest_column_id: dest_column_id.clone(),
                    dest_index,
                });
                if moved {
                    self.select_task(&dest_column_id, &task_id);
                }
                moved
            }
        }
    }

    /// Begin a drag if the pointer is pressed on a card.
    ///
    pub fn pointer_down(&mut self, x: u16, y: u16) -> &mut Self {
        if self.mode != Mode::Board {
            return self;
        }
        let hit = self
            .layout
            .card_at(x, y)
            .map(|(column, slot)| (column.column_id.clone(), column.cards[slot].task_id.clone()));
        let (column_id, task_id) = match hit {
            Some(hit) => hit,
            None => return self,
        };
        let source_index = match self.board().column(&column_id).and_then(|c| c.position_of(&task_id)) {
            Some(idx) => idx,
            None => return self,
        };
        self.drag.begin(task_id.clone(), column_id.clone(), source_index);
        self.reset_hover();
        self.select_task(&column_id, &task_id);
        self.pointer_drag(x, y)
    }

    /// Track pointer motion during a drag, feeding enter/leave signals to
    /// the per-column hover counters.
    ///
    pub fn pointer_drag(&mut self, x: u16, y: u16) -> &mut Self {
        if !self.drag.is_dragging() {
            return self;
        }
        let over = self.layout.column_at(x, y).map(|c| c.column_id.clone());
        if over == self.hovered_column {
            return self;
        }
        if let Some(left) = self.hovered_column.take() {
            self.hover.entry(left).or_default().leave();
        }
        if let Some(entered) = &over {
            self.hover.entry(entered.clone()).or_default().enter();
        }
        self.hovered_column = over;
        self
    }

    /// Finish a drag. Releasing over a column drops the card there;
    /// releasing anywhere else cancels.
    ///
    pub fn pointer_up(&mut self, x: u16, y: u16) -> bool {
        let session = match self.drag.end() {
            Some(session) => session,
            None => return false,
        };
        let payload_text = payload::encode(&session);
        self.reset_hover();
        match self.layout.column_at(x, y).map(|c| c.column_id.clone()) {
            Some(dest_column_id) => self.handle_drop(&payload_text, &dest_column_id, f64::from(y) + 0.5),
            None => {
                debug!("Drag released outside any column, cancelled.");
                false
            }
        }
    }

    /// Abandon the drag in progress, if any.
    ///
    pub fn cancel_drag(&mut self) -> &mut Self {
        if let Some(session) = self.drag.end() {
            debug!("Drag of task {} cancelled.", session.task_id);
            self.status = Some("Drag cancelled".to_string());
        }
        self.reset_hover();
        self
    }

    fn reset_hover(&mut self) {
        for counter in self.hover.values_mut() {
            counter.reset();
        }
        self.hovered_column = None;
    }

    /// Resolve a drop of the serialized drag payload onto a column at the
    /// given pointer row and dispatch the resulting move.
    ///
    pub fn handle_drop(&mut self, payload_text: &str, dest_column_id: &ColumnId, pointer_y: f64) -> bool {
        let session = match payload::decode(payload_text) {
            Ok(session) => session,
            Err(e) => {
                warn!("Drop ignored: {}", e);
                self.status = Some(e.to_string());
                return false;
            }
        };
        let (bounds, rendered) = match self.layout.column(dest_column_id) {
            Some(column) => (column.card_bounds(), column.rendered_ids()),
            None => (vec![], vec![]),
        };
        let task_ids = match self.board().column(dest_column_id) {
            Some(column) => column.task_ids.clone(),
            None => {
                let e = BoardError::ColumnNotFound(dest_column_id.clone());
                warn!("Drop ignored: {}", e);
                self.status = Some(e.to_string());
                return false;
            }
        };
        let slot = resolver::raw_drop_index(pointer_y, &bounds);
        if resolver::lands_in_place(&session, dest_column_id, &rendered, slot) {
            debug!("Drop of task {} leaves it in place.", session.task_id);
            return false;
        }
        let raw_index = filter::slot_to_sequence_index(&task_ids, &rendered, slot);
        match resolver::correct_for_source(&session, dest_column_id, raw_index) {
            DropResolution::NoOp => {
                debug!("Drop of task {} leaves it in place.", session.task_id);
                false
            }
            DropResolution::Move { dest_index } => {
                let task_id = session.task_id.clone();
                let moved = self.dispatch(Intent::MoveTask {
                    task_id: session.task_id,
                    source_column_id: session.source_column_id,
                    source_index: session.source_index,
                    dest_column_id: dest_column_id.clone(),
                    dest_index,
                });
                if moved {
                    self.select_task(dest_column_id, &task_id);
                }
                moved
            }
        }
    }

    /// Enter search mode.
    ///
    pub fn enter_search(&mut self) -> &mut Self {
        self.mode = Mode::Search;
        self
    }

    pub fn push_search_char(&mut self, c: char) -> &mut Self {
        self.search_query.push(c);
        self.clamp_selection();
        self
    }

    pub fn pop_search_char(&mut self) -> &mut Self {
        self.search_query.pop();
        self.clamp_selection();
        self
    }

    /// Leave search mode keeping the filter applied.
    ///
    pub fn finish_search(&mut self) -> &mut Self {
        self.mode = Mode::Board;
        self
    }

    /// Leave search mode and drop the filter.
    ///
    pub fn clear_search(&mut self) -> &mut Self {
        self.search_query.clear();
        self.mode = Mode::Board;
        self.clamp_selection();
        self
    }

    /// Open the composer for a new task in the selected column.
    ///
    pub fn open_create(&mut self) -> &mut Self {
        if let Some(column_id) = self.selected_column_id() {
            self.composer = Some(Composer::create(column_id));
            self.mode = Mode::Compose;
        }
        self
    }

    /// Open the composer on the selected task.
    ///
    pub fn open_edit(&mut self) -> &mut Self {
        let task = self
            .selected_task_id()
            .and_then(|id| self.board().task(&id).cloned());
        if let Some(task) = task {
            self.composer = Some(Composer::edit(task.id, &task.content));
            self.mode = Mode::Compose;
        }
        self
    }

    pub fn cancel_composer(&mut self) -> &mut Self {
        self.composer = None;
        self.mode = Mode::Board;
        self
    }

    /// Submit the composer. Empty content keeps the composer open with a
    /// status message; otherwise the task is created or updated.
    ///
    pub fn submit_composer(&mut self) -> bool {
        let (target, content) = match &self.composer {
            Some(composer) => match composer.validated() {
                Ok(content) => (composer.target().clone(), content),
                Err(e) => {
                    debug!("Composer rejected input: {}", e);
                    self.status = Some(e.to_string());
                    return false;
                }
            },
            None => return false,
        };
        let accepted = match target {
            ComposerTarget::Create(column_id) => {
                let id = next_task_id(self.board(), chrono::Utc::now().timestamp_millis());
                let task = Task::new(id.clone(), content);
                let accepted = self.dispatch(Intent::CreateTask {
                    column_id: column_id.clone(),
                    task,
                });
                if accepted {
                    self.select_task(&column_id, &id);
                }
                accepted
            }
            ComposerTarget::Edit(task_id) => self.dispatch(Intent::UpdateContent { task_id, content }),
        };
        if accepted {
            self.composer = None;
            self.mode = Mode::Board;
        }
        accepted
    }

    /// Ask for confirmation before deleting the selected task.
    ///
    pub fn request_delete(&mut self) -> &mut Self {
        if let (Some(column_id), Some(task_id)) = (self.selected_column_id(), self.selected_task_id()) {
            self.delete_confirmation = Some((column_id, task_id));
            self.mode = Mode::ConfirmDelete;
        }
        self
    }

    pub fn confirm_delete(&mut self) -> bool {
        self.mode = Mode::Board;
        match self.delete_confirmation.take() {
            Some((column_id, task_id)) => self.dispatch(Intent::DeleteTask { column_id, task_id }),
            None => false,
        }
    }

    pub fn cancel_delete(&mut self) -> &mut Self {
        self.delete_confirmation = None;
        self.mode = Mode::Board;
        self
    }

    /// Switch between the light and dark theme and request a config save.
    ///
    pub fn toggle_theme(&mut self) -> &mut Self {
        self.theme = self.theme.toggled();
        info!("Switched to {} theme.", self.theme.name);
        if let Some(sender) = &self.config_save_sender {
            if let Err(e) = sender.send(self.theme.name.clone()) {
                error!("Failed to request config save: {}", e);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CardLayout, ColumnLayout};

    fn ids(state: &State, column: &str) -> Vec<String> {
        state
            .board()
            .column(&ColumnId::from(column))
            .unwrap()
            .task_ids
            .iter()
            .map(|id| id.to_string())
            .collect()
    }

    /// Lay out the seed board with three-row cards starting at row 1.
    ///
    fn lay_out(state: &mut State) {
        let mut columns = vec![];
        for (idx, column_id) in state.column_ids().into_iter().enumerate() {
            let x = idx as u16 * 20;
            let cards = state
                .visible_ids(&column_id)
                .into_iter()
                .enumerate()
                .map(|(slot, task_id)| CardLayout {
                    task_id,
                    area: Rect::new(x + 1, 1 + slot as u16 * 3, 18, 3),
                })
                .collect();
            columns.push(ColumnLayout {
                column_id,
                area: Rect::new(x, 0, 20, 30),
                cards,
            });
        }
        state.set_layout(BoardLayout { columns });
    }

    #[test]
    fn navigate_clamps_to_board() {
        let mut state = State::default();
        state.navigate(Direction::Left).navigate(Direction::Up);
        assert_eq!((state.selected_column_index(), state.selected_task_index()), (0, 0));
        for _ in 0..10 {
            state.navigate(Direction::Down);
        }
        assert_eq!(state.selected_task_index(), 3);
        state.navigate(Direction::Right);
        assert_eq!(state.selected_column_id().unwrap().as_str(), "column-2");
        assert_eq!(state.selected_task_index(), 0);
        assert!(state.selected_task_id().is_none());
    }

    #[test]
    fn keyboard_reorder_within_column() {
        let mut state = State::default();
        state.navigate(Direction::Down);
        assert!(state.move_selected(Direction::Down));
        assert_eq!(ids(&state, "column-1"), vec!["task-1", "task-3", "task-2", "task-4"]);
        assert_eq!(state.selected_task_id().unwrap().as_str(), "task-2");

        assert!(state.move_selected(Direction::Up));
        assert!(state.move_selected(Direction::Up));
        assert_eq!(ids(&state, "column-1"), vec!["task-2", "task-1", "task-3", "task-4"]);
        assert!(!state.move_selected(Direction::Up));
    }

    #[test]
    fn keyboard_move_down_from_last_is_noop() {
        let mut state = State::default();
        for _ in 0..3 {
            state.navigate(Direction::Down);
        }
        let revision = state.revision();
        assert!(!state.move_selected(Direction::Down));
        assert_eq!(state.revision(), revision);
    }

    #[test]
    fn keyboard_move_across_columns() {
        let mut state = State::default();
        state.navigate(Direction::Down);
        assert!(state.move_selected(Direction::Right));
        assert_eq!(ids(&state, "column-1"), vec!["task-1", "task-3", "task-4"]);
        assert_eq!(ids(&state, "column-2"), vec!["task-2"]);
        assert_eq!(state.selected_column_id().unwrap().as_str(), "column-2");
        assert!(state.move_selected(Direction::Right));
        assert!(!state.move_selected(Direction::Right));
        assert_eq!(ids(&state, "column-3"), vec!["task-2"]);
        assert!(!state.board().column(&ColumnId::from("column-2")).unwrap().task_ids.contains(&TaskId::from("task-2")));
    }

    #[test]
    fn mouse_drag_within_column() {
        let mut state = State::default();
        lay_out(&mut state);
        // task-1 occupies rows 1..4, task-3 rows 7..10 (midpoint 8.5)
        state.pointer_down(5, 2);
        assert!(state.is_dragging());
        assert!(state.is_column_hovered(&ColumnId::from("column-1")));
        state.pointer_drag(5, 9);
        assert!(state.pointer_up(5, 9));
        assert_eq!(ids(&state, "column-1"), vec!["task-2", "task-3", "task-1", "task-4"]);
        assert!(!state.is_dragging());
        assert!(!state.is_column_hovered(&ColumnId::from("column-1")));
    }

    #[test]
    fn mouse_drop_in_place_is_noop() {
        let mut state = State::default();
        lay_out(&mut state);
        state.pointer_down(5, 5);
        let revision = state.revision();
        assert!(!state.pointer_up(5, 5));
        assert_eq!(state.revision(), revision);
    }

    #[test]
    fn mouse_drag_to_other_column() {
        let mut state = State::default();
        lay_out(&mut state);
        state.pointer_down(5, 2);
        state.pointer_drag(25, 10);
        assert!(state.is_column_hovered(&ColumnId::from("column-2")));
        assert!(!state.is_column_hovered(&ColumnId::from("column-1")));
        assert!(state.pointer_up(25, 10));
        assert_eq!(ids(&state, "column-2"), vec!["task-1"]);
        assert_eq!(state.selected_task_id().unwrap().as_str(), "task-1");
    }

    #[test]
    fn release_outside_columns_cancels() {
        let mut state = State::default();
        lay_out(&mut state);
        state.pointer_down(5, 2);
        assert!(!state.pointer_up(70, 2));
        assert!(!state.is_dragging());
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn cancel_drag_clears_session() {
        let mut state = State::default();
        lay_out(&mut state);
        state.pointer_down(5, 2);
        state.cancel_drag();
        assert!(!state.is_dragging());
        assert!(!state.pointer_up(25, 10));
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn malformed_payload_is_ignored() {
        let mut state = State::default();
        lay_out(&mut state);
        assert!(!state.handle_drop("not json", &ColumnId::from("column-2"), 2.5));
        assert!(!state.handle_drop(r#"{"taskId":"task-1"}"#, &ColumnId::from("column-2"), 2.5));
        assert_eq!(state.revision(), 0);
        assert!(state.status().is_some());
    }

    #[test]
    fn drop_respects_search_filter() {
        let mut state = State::default();
        state.enter_search();
        for c in "design".chars() {
            state.push_search_char(c);
        }
        state.finish_search();
        lay_out(&mut state);
        assert_eq!(state.visible_ids(&ColumnId::from("column-1")), vec![TaskId::from("task-2")]);

        // Dropping above the only rendered card lands before task-2, not at the top
        let payload = payload::encode(&DragSession {
            task_id: TaskId::from("task-4"),
            source_column_id: ColumnId::from("column-1"),
            source_index: 3,
        });
        assert!(state.handle_drop(&payload, &ColumnId::from("column-1"), 1.5));
        assert_eq!(ids(&state, "column-1"), vec!["task-1", "task-4", "task-2", "task-3"]);
    }

    #[test]
    fn filtered_drop_next_to_itself_is_noop() {
        let mut state = State::default();
        state.enter_search();
        state.push_search_char('u');
        state.finish_search();
        lay_out(&mut state);
        let column = ColumnId::from("column-1");
        assert_eq!(
            state.visible_ids(&column),
            vec![TaskId::from("task-1"), TaskId::from("task-2"), TaskId::from("task-4")]
        );

        // task-2 spans rows 4..7; task-4 spans rows 7..10 with midpoint 8.5
        state.pointer_down(5, 5);
        assert!(!state.pointer_up(5, 7));
        assert_eq!(state.revision(), 0);
        assert_eq!(ids(&state, "column-1"), vec!["task-1", "task-2", "task-3", "task-4"]);

        // past task-4 it does move, behind the hidden task-3 too
        state.pointer_down(5, 5);
        assert!(state.pointer_up(5, 9));
        assert_eq!(ids(&state, "column-1"), vec!["task-1", "task-3", "task-4", "task-2"]);
    }

    #[test]
    fn filtered_keyboard_move_skips_hidden_cards() {
        let mut state = State::default();
        state.enter_search();
        state.push_search_char('u');
        state.finish_search();
        state.navigate(Direction::Down);
        assert_eq!(state.selected_task_id().unwrap().as_str(), "task-2");
        assert!(state.move_selected(Direction::Down));
        assert_eq!(ids(&state, "column-1"), vec!["task-1", "task-3", "task-4", "task-2"]);
        assert!(!state.move_selected(Direction::Down));
        assert_eq!(state.revision(), 1);
    }

    #[test]
    fn composer_creates_and_edits() {
        let mut state = State::default();
        state.open_create();
        assert_eq!(state.mode(), Mode::Compose);
        assert!(!state.submit_composer());
        assert_eq!(state.status(), Some(BoardError::EmptyContent.to_string().as_str()));

        for c in "  Ship it ".chars() {
            state.composer_mut().unwrap().insert_char(c);
        }
        assert!(state.submit_composer());
        assert_eq!(state.mode(), Mode::Board);
        let created = state.selected_task_id().unwrap();
        assert!(created.as_str().starts_with("task-"));
        assert_eq!(state.board().task(&created).unwrap().content, "Ship it");
        assert_eq!(ids(&state, "column-1").last().unwrap(), created.as_str());

        state.open_edit();
        state.composer_mut().unwrap().insert_char('!');
        assert!(state.submit_composer());
        assert_eq!(state.board().task(&created).unwrap().content, "Ship it!");
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut state = State::default();
        state.request_delete();
        assert_eq!(state.mode(), Mode::ConfirmDelete);
        state.cancel_delete();
        assert_eq!(ids(&state, "column-1").len(), 4);

        state.request_delete();
        assert!(state.confirm_delete());
        assert_eq!(ids(&state, "column-1"), vec!["task-2", "task-3", "task-4"]);
        assert!(state.board().task(&TaskId::from("task-1")).is_none());
    }

    #[test]
    fn search_filters_and_clamps_selection() {
        let mut state = State::default();
        for _ in 0..3 {
            state.navigate(Direction::Down);
        }
        state.enter_search();
        for c in "zzz-no-match".chars() {
            state.push_search_char(c);
        }
        assert!(state.visible_ids(&ColumnId::from("column-1")).is_empty());
        assert_eq!(state.selected_task_index(), 0);
        state.clear_search();
        assert_eq!(state.visible_ids(&ColumnId::from("column-1")).len(), 4);
        assert_eq!(state.mode(), Mode::Board);
    }

    #[test]
    fn toggle_theme_requests_config_save() {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut state = State::new(Store::default(), None, Some(tx), Theme::dark(), LogBuffer::new());
        state.toggle_theme();
        assert_eq!(state.theme().name, "light");
        assert_eq!(rx.recv().unwrap(), "light");
    }
}
