//! Task composer state.
//!
//! The composer is the create/edit pathway. It owns the text being typed and
//! is where empty content is rejected; the board engine itself accepts any
//! text.

use crate::board::{Board, BoardError, ColumnId, TaskId};
use tui_textarea::{CursorMove, TextArea};

/// What the composer will do on submit.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerTarget {
    Create(ColumnId),
    Edit(TaskId),
}

/// Text input for creating or editing a task.
///
pub struct Composer {
    target: ComposerTarget,
    textarea: TextArea<'static>,
}

impl Composer {
    /// Return a composer for a new task in the given column.
    ///
    pub fn create(column_id: ColumnId) -> Self {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text("Enter a title for this card...");
        Composer {
            target: ComposerTarget::Create(column_id),
            textarea,
        }
    }

    /// Return a composer prefilled with the current content of a task.
    ///
    pub fn edit(task_id: TaskId, content: &str) -> Self {
        let mut textarea = TextArea::from(content.lines().map(str::to_string).collect::<Vec<_>>());
        textarea.move_cursor(CursorMove::Bottom);
        textarea.move_cursor(CursorMove::End);
        Composer {
            target: ComposerTarget::Edit(task_id),
            textarea,
        }
    }

    pub fn target(&self) -> &ComposerTarget {
        &self.target
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn textarea_mut(&mut self) -> &mut TextArea<'static> {
        &mut self.textarea
    }

    pub fn insert_char(&mut self, c: char) -> &mut Self {
        self.textarea.insert_char(c);
        self
    }

    pub fn insert_newline(&mut self) -> &mut Self {
        self.textarea.insert_newline();
        self
    }

    pub fn backspace(&mut self) -> &mut Self {
        self.textarea.delete_char();
        self
    }

    pub fn delete(&mut self) -> &mut Self {
        self.textarea.delete_next_char();
        self
    }

    pub fn move_cursor(&mut self, cursor: CursorMove) -> &mut Self {
        self.textarea.move_cursor(cursor);
        self
    }

    /// Return the raw text typed so far.
    ///
    pub fn content(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Return the trimmed text, rejecting whitespace-only input.
    ///
    pub fn validated(&self) -> Result<String, BoardError> {
        validate_content(&self.content())
    }
}

/// Trim task text and reject it if nothing remains.
///
pub fn validate_content(content: &str) -> Result<String, BoardError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        Err(BoardError::EmptyContent)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Generate a task id of the form `task-<unix millis>` that is not yet
/// used on the board.
///
pub fn next_task_id(board: &Board, now_millis: i64) -> TaskId {
    let mut millis = now_millis;
    loop {
        let candidate = TaskId::new(format!("task-{}", millis));
        if board.task(&candidate).is_none() {
            return candidate;
        }
        millis += 1;
    }
}
