//! Text form of a drag session, used wherever the drag crosses a boundary.

use super::session::DragSession;
use crate::board::{BoardError, ColumnId, TaskId};
use serde::{Deserialize, Serialize};

/// Wire shape of the drop payload. Fields are optional so that a missing
/// field is reported as a malformed payload rather than a parse error.
///
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Wire {
    task_id: Option<String>,
    source_column_id: Option<String>,
    source_index: Option<usize>,
}

/// Serialize a session into the drop payload text.
///
pub fn encode(session: &DragSession) -> String {
    let wire = Wire {
        task_id: Some(session.task_id.to_string()),
        source_column_id: Some(session.source_column_id.to_string()),
        source_index: Some(session.source_index),
    };
    // a struct of strings and integers always serializes
    serde_json::to_string(&wire).unwrap_or_default()
}

/// Parse drop payload text back into a session.
///
pub fn decode(text: &str) -> Result<DragSession, BoardError> {
    let wire: Wire = serde_json::from_str(text)
        .map_err(|e| BoardError::MalformedDragPayload(e.to_string()))?;

    let task_id = wire
        .task_id
        .map(TaskId::from)
        .filter(|id| !id.is_blank())
        .ok_or_else(|| BoardError::MalformedDragPayload("missing taskId".to_string()))?;
    let source_column_id = wire
        .source_column_id
        .map(ColumnId::from)
        .filter(|id| !id.is_blank())
        .ok_or_else(|| BoardError::MalformedDragPayload("missing sourceColumnId".to_string()))?;
    let source_index = wire
        .source_index
        .ok_or_else(|| BoardError::MalformedDragPayload("missing sourceIndex".to_string()))?;

    Ok(DragSession {
        task_id,
        source_column_id,
        source_index,
    })
}
