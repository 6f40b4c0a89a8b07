//! Board mutations.
//!
//! Each intent is a pure transition from one consistent board to another.
//! Precondition failures never panic: they return a [`BoardError`] and the
//! input board is left as it was.

use super::error::BoardError;
use super::model::{Board, ColumnId, Task, TaskId};
use super::sequence::{insert_clamped, remove_at_or_find, splice_move};

/// Specify the different board intents.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    CreateTask {
        column_id: ColumnId,
        task: Task,
    },
    DeleteTask {
        column_id: ColumnId,
        task_id: TaskId,
    },
    UpdateContent {
        task_id: TaskId,
        content: String,
    },
    MoveTask {
        task_id: TaskId,
        source_column_id: ColumnId,
        source_index: usize,
        dest_column_id: ColumnId,
        dest_index: usize,
    },
}

/// Apply an intent to a board, returning the next board.
///
pub fn apply(board: &Board, intent: &Intent) -> Result<Board, BoardError> {
    match intent {
        Intent::CreateTask { column_id, task } => create_task(board, column_id, task),
        Intent::DeleteTask { column_id, task_id } => Ok(delete_task(board, column_id, task_id)),
        Intent::UpdateContent { task_id, content } => update_content(board, task_id, content),
        Intent::MoveTask {
            task_id,
            source_column_id,
            source_index,
            dest_column_id,
            dest_index,
        } => move_task(
            board,
            task_id,
            source_column_id,
            *source_index,
            dest_column_id,
            *dest_index,
        ),
    }
}

/// Insert a task and append it to the end of the column.
///
pub fn create_task(board: &Board, column_id: &ColumnId, task: &Task) -> Result<Board, BoardError> {
    if !board.columns.contains_key(column_id) {
        return Err(BoardError::ColumnNotFound(column_id.clone()));
    }
    if board.tasks.contains_key(&task.id) {
        return Err(BoardError::DuplicateTask(task.id.clone()));
    }

    let mut next = board.clone();
    next.tasks.insert(task.id.clone(), task.clone());
    if let Some(column) = next.columns.get_mut(column_id) {
        column.task_ids.push(task.id.clone());
    }
    Ok(next)
}

/// Remove a task from its column and from the task records. Deleting a task
/// that is already gone yields an identical board.
///
pub fn delete_task(board: &Board, column_id: &ColumnId, task_id: &TaskId) -> Board {
    let mut next = board.clone();
    if let Some(column) = next.columns.get_mut(column_id) {
        column.task_ids.retain(|id| id != task_id);
    }
    // a stale column id must not leave a dangling reference behind
    for column in next.columns.values_mut() {
        column.task_ids.retain(|id| id != task_id);
    }
    next.tasks.remove(task_id);
    next
}

/// Replace the content of an existing task.
///
pub fn update_content(board: &Board, task_id: &TaskId, content: &str) -> Result<Board, BoardError> {
    if !board.tasks.contains_key(task_id) {
        return Err(BoardError::TaskNotFound(task_id.clone()));
    }
    let mut next = board.clone();
    if let Some(task) = next.tasks.get_mut(task_id) {
        task.content = content.to_string();
    }
    Ok(next)
}

/// Move a task within a column or across columns. `dest_index` is relative
/// to the destination sequence after the task has been removed from its
/// source.
///
pub fn move_task(
    board: &Board,
    task_id: &TaskId,
    source_column_id: &ColumnId,
    source_index: usize,
    dest_column_id: &ColumnId,
    dest_index: usize,
) -> Result<Board, BoardError> {
    if !board.tasks.contains_key(task_id) {
        return Err(BoardError::TaskNotFound(task_id.clone()));
    }
    let source = board
        .column(source_column_id)
        .ok_or_else(|| BoardError::ColumnNotFound(source_column_id.clone()))?;
    if !board.columns.contains_key(dest_column_id) {
        return Err(BoardError::ColumnNotFound(dest_column_id.clone()));
    }
    let not_in_column = || BoardError::TaskNotInColumn {
        task: task_id.clone(),
        column: source_column_id.clone(),
    };

    let mut next = board.clone();

    if source_column_id == dest_column_id {
        let from = match source.task_ids.get(source_index) {
            Some(found) if found == task_id => source_index,
            _ => source.position_of(task_id).ok_or_else(not_in_column)?,
        };
        if let Some(column) = next.columns.get_mut(source_column_id) {
            splice_move(&mut column.task_ids, from, dest_index);
        }
        return Ok(next);
    }

    let removed = next
        .columns
        .get_mut(source_column_id)
        .and_then(|column| remove_at_or_find(&mut column.task_ids, source_index, task_id));
    if removed.is_none() {
        return Err(not_in_column());
    }
    if let Some(column) = next.columns.get_mut(dest_column_id) {
        insert_clamped(&mut column.task_ids, dest_index, task_id.clone());
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::model::Column;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn ids(values: &[&str]) -> Vec<TaskId> {
        values.iter().map(|v| TaskId::from(*v)).collect()
    }

    /// Two columns: "column-1" holding `todo` and "column-2" holding `doing`.
    fn board_with(todo: &[&str], doing: &[&str]) -> Board {
        let mut first = Column::new("column-1", "To Do");
        first.task_ids = ids(todo);
        let mut second = Column::new("column-2", "In Progress");
        second.task_ids = ids(doing);
        let tasks = todo
            .iter()
            .chain(doing.iter())
            .map(|id| Task::new(*id, format!("Task {}", id)))
            .collect();
        Board::from_parts(vec![first, second], tasks)
    }

    fn order(board: &Board, column: &str) -> Vec<String> {
        board
            .column(&ColumnId::from(column))
            .unwrap()
            .task_ids
            .iter()
            .map(|id| id.to_string())
            .collect()
    }

    fn move_intent(task: &str, from: &str, from_idx: usize, to: &str, to_idx: usize) -> Intent {
        Intent::MoveTask {
            task_id: TaskId::from(task),
            source_column_id: ColumnId::from(from),
            source_index: from_idx,
            dest_column_id: ColumnId::from(to),
            dest_index: to_idx,
        }
    }

    #[test]
    fn create_task_appends_to_column() {
        let board = board_with(&["task-1", "task-2"], &[]);
        let intent = Intent::CreateTask {
            column_id: ColumnId::from("column-1"),
            task: Task::new("task-3", "Task 3"),
        };
        let next = apply(&board, &intent).unwrap();
        assert_eq!(order(&next, "column-1"), vec!["task-1", "task-2", "task-3"]);
        assert_eq!(next.task(&TaskId::from("task-3")).unwrap().content, "Task 3");
        assert!(next.is_consistent());
    }

    #[test]
    fn create_task_in_unknown_column_is_noop() {
        let board = board_with(&["task-1"], &[]);
        let intent = Intent::CreateTask {
            column_id: ColumnId::from("column-9"),
            task: Task::new("task-3", "Task 3"),
        };
        assert_eq!(
            apply(&board, &intent),
            Err(BoardError::ColumnNotFound(ColumnId::from("column-9")))
        );
    }

    #[test]
    fn create_task_with_existing_id_is_noop() {
        let board = board_with(&["task-1"], &[]);
        let intent = Intent::CreateTask {
            column_id: ColumnId::from("column-2"),
            task: Task::new("task-1", "Again"),
        };
        assert_eq!(
            apply(&board, &intent),
            Err(BoardError::DuplicateTask(TaskId::from("task-1")))
        );
    }

    #[test]
    fn delete_task_removes_record_and_reference() {
        let board = board_with(&["task-1", "task-2"], &[]);
        let next = delete_task(&board, &ColumnId::from("column-1"), &TaskId::from("task-1"));
        assert_eq!(order(&next, "column-1"), vec!["task-2"]);
        assert!(next.task(&TaskId::from("task-1")).is_none());
        assert!(next.is_consistent());
    }

    #[test]
    fn delete_task_is_idempotent() {
        let board = board_with(&["task-1", "task-2"], &["task-3"]);
        let column = ColumnId::from("column-1");
        let task = TaskId::from("task-2");
        let once = delete_task(&board, &column, &task);
        let twice = delete_task(&once, &column, &task);
        assert_eq!(once, twice);
    }

    #[test]
    fn delete_task_with_stale_column_leaves_no_dangling_reference() {
        let board = board_with(&["task-1"], &["task-2"]);
        let next = delete_task(&board, &ColumnId::from("column-1"), &TaskId::from("task-2"));
        assert!(next.task(&TaskId::from("task-2")).is_none());
        assert!(order(&next, "column-2").is_empty());
        assert!(next.is_consistent());
    }

    #[test]
    fn update_content_replaces_text() {
        let board = board_with(&["task-1"], &[]);
        let intent = Intent::UpdateContent {
            task_id: TaskId::from("task-1"),
            content: "Updated Task 1".to_string(),
        };
        let next = apply(&board, &intent).unwrap();
        assert_eq!(next.task(&TaskId::from("task-1")).unwrap().content, "Updated Task 1");
    }

    #[test]
    fn update_content_allows_blank_text() {
        let board = board_with(&["task-1"], &[]);
        let next = update_content(&board, &TaskId::from("task-1"), "   ").unwrap();
        assert_eq!(next.task(&TaskId::from("task-1")).unwrap().content, "   ");
    }

    #[test]
    fn update_content_of_unknown_task_is_noop() {
        let board = board_with(&["task-1"], &[]);
        assert_eq!(
            update_content(&board, &TaskId::from("task-7"), "x"),
            Err(BoardError::TaskNotFound(TaskId::from("task-7")))
        );
    }

    #[test]
    fn move_within_column() {
        let board = board_with(&["task-1", "task-2"], &[]);
        let next = apply(&board, &move_intent("task-1", "column-1", 0, "column-1", 1)).unwrap();
        assert_eq!(order(&next, "column-1"), vec!["task-2", "task-1"]);
    }

    #[test]
    fn move_within_column_past_end_clamps() {
        let board = board_with(&["t1", "t2"], &[]);
        let next = apply(&board, &move_intent("t1", "column-1", 0, "column-1", 2)).unwrap();
        assert_eq!(order(&next, "column-1"), vec!["t2", "t1"]);
    }

    #[test]
    fn move_within_column_corrected_destination() {
        let board = board_with(&["a", "b", "c"], &[]);
        let next = apply(&board, &move_intent("a", "column-1", 0, "column-1", 1)).unwrap();
        assert_eq!(order(&next, "column-1"), vec!["b", "a", "c"]);
    }

    #[test]
    fn identity_move_is_accepted_and_changes_nothing() {
        let board = board_with(&["a", "b", "c"], &[]);
        let next = apply(&board, &move_intent("b", "column-1", 1, "column-1", 1)).unwrap();
        assert_eq!(next, board);
    }

    #[test]
    fn same_column_reorder_for_all_indices() {
        let names = ["a", "b", "c", "d", "e"];
        for i in 0..names.len() {
            for d in 0..names.len() {
                let board = board_with(&names, &[]);
                let next = apply(&board, &move_intent(names[i], "column-1", i, "column-1", d)).unwrap();

                let mut expected: Vec<String> = names.iter().map(|s| s.to_string()).collect();
                let item = expected.remove(i);
                expected.insert(d, item);
                assert_eq!(order(&next, "column-1"), expected, "i={} d={}", i, d);
            }
        }
    }

    #[test]
    fn move_between_columns() {
        let board = board_with(&["task-1", "task-2"], &[]);
        let next = apply(&board, &move_intent("task-1", "column-1", 0, "column-2", 0)).unwrap();
        assert_eq!(order(&next, "column-1"), vec!["task-2"]);
        assert_eq!(order(&next, "column-2"), vec!["task-1"]);
        assert_eq!(next.tasks, board.tasks);
    }

    #[test]
    fn cross_column_move_for_all_destinations() {
        let todo = ["a", "b", "c"];
        let doing = ["x", "y"];
        for d in 0..=doing.len() {
            let board = board_with(&todo, &doing);
            let next = apply(&board, &move_intent("b", "column-1", 1, "column-2", d)).unwrap();
            assert_eq!(order(&next, "column-1"), vec!["a", "c"]);
            let dest = order(&next, "column-2");
            assert_eq!(dest.len(), doing.len() + 1);
            assert_eq!(dest[d], "b");
            assert!(next.is_consistent());
        }
    }

    #[test]
    fn cross_column_move_clamps_destination() {
        let board = board_with(&["a"], &["x"]);
        let next = apply(&board, &move_intent("a", "column-1", 0, "column-2", 42)).unwrap();
        assert_eq!(order(&next, "column-2"), vec!["x", "a"]);
    }

    #[test]
    fn cross_column_move_with_stale_index_removes_by_value() {
        let board = board_with(&["a", "b", "c"], &[]);
        let next = apply(&board, &move_intent("c", "column-1", 0, "column-2", 0)).unwrap();
        assert_eq!(order(&next, "column-1"), vec!["a", "b"]);
        assert_eq!(order(&next, "column-2"), vec!["c"]);
    }

    #[test]
    fn same_column_move_with_stale_index_uses_actual_position() {
        let board = board_with(&["a", "b", "c"], &[]);
        let next = apply(&board, &move_intent("c", "column-1", 0, "column-1", 0)).unwrap();
        assert_eq!(order(&next, "column-1"), vec!["c", "a", "b"]);
    }

    #[test]
    fn move_precondition_failures_are_noops() {
        let board = board_with(&["a"], &["x"]);
        assert_eq!(
            apply(&board, &move_intent("zzz", "column-1", 0, "column-2", 0)),
            Err(BoardError::TaskNotFound(TaskId::from("zzz")))
        );
        assert_eq!(
            apply(&board, &move_intent("a", "column-9", 0, "column-2", 0)),
            Err(BoardError::ColumnNotFound(ColumnId::from("column-9")))
        );
        assert_eq!(
            apply(&board, &move_intent("a", "column-1", 0, "column-9", 0)),
            Err(BoardError::ColumnNotFound(ColumnId::from("column-9")))
        );
        assert_eq!(
            apply(&board, &move_intent("x", "column-1", 0, "column-2", 0)),
            Err(BoardError::TaskNotInColumn {
                task: TaskId::from("x"),
                column: ColumnId::from("column-1"),
            })
        );
    }

    fn random_intent(board: &Board, rng: &mut StdRng, counter: &mut usize) -> Intent {
        let columns: Vec<ColumnId> = board.column_order.clone();
        let column = columns[rng.gen_range(0..columns.len())].clone();
        let task_ids: Vec<TaskId> = board.tasks.keys().cloned().collect();
        let pick_task = |rng: &mut StdRng| -> TaskId {
            if task_ids.is_empty() || rng.gen_bool(0.1) {
                TaskId::from("missing")
            } else {
                task_ids[rng.gen_range(0..task_ids.len())].clone()
            }
        };

        match rng.gen_range(0..4) {
            0 => {
                *counter += 1;
                Intent::CreateTask {
                    column_id: column,
                    task: Task::new(format!("task-{}", counter), Sentence(2..6).fake::<String>()),
                }
            }
            1 => Intent::DeleteTask {
                column_id: column,
                task_id: pick_task(rng),
            },
            2 => Intent::UpdateContent {
                task_id: pick_task(rng),
                content: Sentence(1..4).fake::<String>(),
            },
            _ => {
                let task_id = pick_task(rng);
                let (source_column_id, source_index) = match board.locate(&task_id) {
                    Some((column_id, idx)) if rng.gen_bool(0.8) => (column_id.clone(), idx),
                    _ => (columns[rng.gen_range(0..columns.len())].clone(), rng.gen_range(0..6)),
                };
                Intent::MoveTask {
                    task_id,
                    source_column_id,
                    source_index,
                    dest_column_id: columns[rng.gen_range(0..columns.len())].clone(),
                    dest_index: rng.gen_range(0..8),
                }
            }
        }
    }

    #[test]
    fn random_intent_sequences_preserve_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..20 {
            let mut board = Board::seed();
            let mut counter = 100;
            for _ in 0..200 {
                let intent = random_intent(&board, &mut rng, &mut counter);
                match apply(&board, &intent) {
                    Ok(next) => board = next,
                    Err(_) => {}
                }
                assert!(board.is_consistent(), "{:?} after {:?}", board.violations(), intent);
            }
        }
    }

    #[test]
    fn failed_intent_leaves_task_count_unchanged() {
        let board = Board::seed();
        let before = board.tasks.len();
        let _ = apply(&board, &move_intent("task-1", "column-3", 0, "column-2", 0));
        assert_eq!(board.tasks.len(), before);
    }
}
