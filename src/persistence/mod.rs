//! Board persistence.
//!
//! This module reads the stored board at startup and writes snapshots in
//! the background. Writes are throttled: snapshots arriving within one
//! coalescing window collapse into a single write of the latest one.

mod error;

pub use error::PersistenceError;

use crate::board::Board;
use log::*;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Define specification for the board file.
///
#[derive(Serialize, Deserialize)]
struct Document {
    board: Board,
}

/// Load the board stored at `path`. Returns `None` if there is no file yet.
/// A stored board that breaks an invariant is repaired before it is
/// returned.
///
pub fn load_board(path: &Path) -> Result<Option<Board>, PersistenceError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path).map_err(|e| PersistenceError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    let document: Document = serde_json::from_str(&contents)
        .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))?;

    let mut board = document.board;
    for repair in board.normalize() {
        warn!("Repaired stored board: {}", repair);
    }
    Ok(Some(board))
}

/// Write the board to `path`, going through a temporary file so a crash
/// never leaves a half-written board behind.
///
pub fn save_board(path: &Path, board: &Board) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::CreateDirectoryFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }
    let content = serde_json::to_string_pretty(&Document {
        board: board.clone(),
    })
    .map_err(|e| PersistenceError::SerializationFailed(e.to_string()))?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, content).map_err(|e| PersistenceError::WriteFailed {
        path: tmp_path.clone(),
        source: e,
    })?;
    fs::rename(&tmp_path, path).map_err(|e| PersistenceError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Destination for board snapshots.
///
pub trait SnapshotSink: Send + 'static {
    fn write(&mut self, board: &Board) -> Result<(), PersistenceError>;
}

/// Writes snapshots to a JSON file on disk.
///
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: PathBuf) -> Self {
        FileSink { path }
    }
}

impl SnapshotSink for FileSink {
    fn write(&mut self, board: &Board) -> Result<(), PersistenceError> {
        save_board(&self.path, board)
    }
}

/// Handle for scheduling snapshot writes. Dropping every handle flushes
/// the pending snapshot and stops the background task.
///
#[derive(Clone)]
pub struct Saver {
    tx: mpsc::UnboundedSender<Board>,
}

impl Saver {
    /// Queue a snapshot for writing. Never blocks.
    ///
    pub fn schedule(&self, board: Board) {
        if self.tx.send(board).is_err() {
            warn!("Board saver has stopped, snapshot discarded");
        }
    }
}

/// Start the background saver on the current tokio runtime.
///
pub fn spawn_saver<S: SnapshotSink>(sink: S, window: Duration) -> (Saver, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run_saver(sink, rx, window));
    (Saver { tx }, handle)
}

async fn run_saver<S: SnapshotSink>(mut sink: S, mut rx: mpsc::UnboundedReceiver<Board>, window: Duration) {
    debug!("Board saver started with a {:?} window", window);
    while let Some(mut latest) = rx.recv().await {
        let deadline = Instant::now() + window;
        let mut closed = false;
        loop {
            tokio::select! {
                next = rx.recv() => match next {
                    Some(board) => latest = board,
                    None => {
                        closed = true;
                        break;
                    }
                },
                _ = tokio::time::sleep_until(deadline) => break,
            }
        }
        match sink.write(&latest) {
            Ok(_) => debug!("Board snapshot saved."),
            Err(e) => error!("Could not save board: {}", e),
        }
        if closed {
            break;
        }
    }
    debug!("Board saver stopped.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ColumnId, Intent, Store, Task, TaskId};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingSink {
        writes: Arc<Mutex<Vec<Board>>>,
    }

    impl SnapshotSink for RecordingSink {
        fn write(&mut self, board: &Board) -> Result<(), PersistenceError> {
            self.writes.lock().unwrap().push(board.clone());
            Ok(())
        }
    }

    fn board_with_extra(id: &str) -> Board {
        let mut store = Store::default();
        store
            .dispatch(Intent::CreateTask {
                column_id: ColumnId::from("column-2"),
                task: Task::new(id, "extra"),
            })
            .unwrap();
        store.board().clone()
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_board(&dir.path().join("board.json")).unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("board.json");
        let board = board_with_extra("task-9");
        save_board(&path, &board).unwrap();
        assert_eq!(load_board(&path).unwrap(), Some(board));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn saved_document_wraps_board() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        save_board(&path, &Board::seed()).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw["board"]["columnOrder"].is_array());
        assert_eq!(raw["board"]["columns"]["column-1"]["taskIds"][0], "task-1");
    }

    #[test]
    fn load_invalid_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(matches!(
            load_board(&path),
            Err(PersistenceError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn load_repairs_inconsistent_board() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        fs::write(
            &path,
            r#"{"board":{
                "tasks":{"a":{"id":"a","content":"A"},"orphan":{"id":"orphan","content":"O"}},
                "columns":{"c1":{"id":"c1","title":"One","taskIds":["a","ghost","a"]}},
                "columnOrder":[]
            }}"#,
        )
        .unwrap();
        let board = load_board(&path).unwrap().unwrap();
        assert!(board.is_consistent(), "{:?}", board.violations());
        assert_eq!(board.column(&ColumnId::from("c1")).unwrap().task_ids, vec![TaskId::from("a")]);
        assert!(board.task(&TaskId::from("orphan")).is_none());
    }

    #[test]
    fn load_renames_records_stored_under_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        fs::write(
            &path,
            r#"{"board":{
                "tasks":{"a":{"id":"b","content":"A"}},
                "columns":{"c1":{"id":"c2","title":"One","taskIds":["a"]}},
                "columnOrder":["c1"]
            }}"#,
        )
        .unwrap();
        let board = load_board(&path).unwrap().unwrap();
        assert!(board.is_consistent(), "{:?}", board.violations());
        assert_eq!(board.task(&TaskId::from("a")).unwrap().id, TaskId::from("a"));
        assert_eq!(board.column(&ColumnId::from("c1")).unwrap().id, ColumnId::from("c1"));

        // the card shown can now be deleted by the id it is shown under
        let mut store = Store::from_initial(Some(board));
        store
            .dispatch(Intent::DeleteTask {
                column_id: ColumnId::from("c1"),
                task_id: TaskId::from("a"),
            })
            .unwrap();
        assert!(store.board().tasks.is_empty());
        assert!(store.board().column(&ColumnId::from("c1")).unwrap().task_ids.is_empty());
    }

    #[tokio::test]
    async fn snapshots_within_window_coalesce() {
        let sink = RecordingSink::default();
        let writes = Arc::clone(&sink.writes);
        let (saver, handle) = spawn_saver(sink, Duration::from_millis(200));

        saver.schedule(Board::seed());
        saver.schedule(board_with_extra("task-5"));
        let last = board_with_extra("task-6");
        saver.schedule(last.clone());
        tokio::time::sleep(Duration::from_millis(400)).await;

        drop(saver);
        handle.await.unwrap();
        let writes = writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0], last);
    }

    #[tokio::test]
    async fn separate_windows_write_separately() {
        let sink = RecordingSink::default();
        let writes = Arc::clone(&sink.writes);
        let (saver, handle) = spawn_saver(sink, Duration::from_millis(20));

        saver.schedule(Board::seed());
        tokio::time::sleep(Duration::from_millis(150)).await;
        saver.schedule(board_with_extra("task-7"));
        tokio::time::sleep(Duration::from_millis(150)).await;

        drop(saver);
        handle.await.unwrap();
        assert_eq!(writes.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn pending_snapshot_is_flushed_on_shutdown() {
        let sink = RecordingSink::default();
        let writes = Arc::clone(&sink.writes);
        let (saver, handle) = spawn_saver(sink, Duration::from_secs(60));

        let last = board_with_extra("task-8");
        saver.schedule(last.clone());
        drop(saver);
        handle.await.unwrap();
        assert_eq!(*writes.lock().unwrap(), vec![last]);
    }

    #[tokio::test]
    async fn file_sink_writes_board() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        let (saver, handle) = spawn_saver(FileSink::new(path.clone()), Duration::from_millis(10));
        saver.schedule(Board::seed());
        drop(saver);
        handle.await.unwrap();
        assert_eq!(load_board(&path).unwrap(), Some(Board::seed()));
    }
}
