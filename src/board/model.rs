use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Identifier of a task card.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

/// Identifier of a board column.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                $name(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name(value)
            }
        }
    };
}

string_id!(TaskId);
string_id!(ColumnId);

/// Defines task data structure.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub content: String,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, content: impl Into<String>) -> Self {
        Task {
            id: id.into(),
            content: content.into(),
        }
    }
}

/// Defines column data structure. `task_ids` is the only record of task
/// position on the board.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub task_ids: Vec<TaskId>,
}

impl Column {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Column {
            id: id.into(),
            title: title.into(),
            task_ids: vec![],
        }
    }

    /// Return the position of the given task within this column.
    ///
    pub fn position_of(&self, task_id: &TaskId) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }
}

/// The whole board: task records, column records and column display order.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub tasks: BTreeMap<TaskId, Task>,
    pub columns: BTreeMap<ColumnId, Column>,
    pub column_order: Vec<ColumnId>,
}

impl Board {
    /// Build a board from columns (kept in the given order) and tasks.
    /// No invariant checking happens here; see [`Board::violations`].
    ///
    pub fn from_parts(columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        let column_order = columns.iter().map(|c| c.id.clone()).collect();
        Board {
            tasks: tasks.into_iter().map(|t| (t.id.clone(), t)).collect(),
            columns: columns.into_iter().map(|c| (c.id.clone(), c)).collect(),
            column_order,
        }
    }

    /// Board used when nothing has been persisted yet: three columns with
    /// four tasks waiting in "To Do".
    ///
    pub fn seed() -> Self {
        let tasks = vec![
            Task::new("task-1", "Configure the project"),
            Task::new("task-2", "Design the UI"),
            Task::new("task-3", "Implement drag and drop"),
            Task::new("task-4", "Write unit tests"),
        ];
        let mut todo = Column::new("column-1", "To Do");
        todo.task_ids = tasks.iter().map(|t| t.id.clone()).collect();
        Board::from_parts(
            vec![
                todo,
                Column::new("column-2", "In Progress"),
                Column::new("column-3", "Done"),
            ],
            tasks,
        )
    }

    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    pub fn column(&self, column_id: &ColumnId) -> Option<&Column> {
        self.columns.get(column_id)
    }

    /// Iterate columns in display order.
    ///
    pub fn ordered_columns(&self) -> impl Iterator<Item = &Column> {
        self.column_order
            .iter()
            .filter_map(move |id| self.columns.get(id))
    }

    /// Return the tasks of a column in display order.
    ///
    pub fn column_tasks(&self, column_id: &ColumnId) -> Vec<&Task> {
        self.column(column_id)
            .map(|column| {
                column
                    .task_ids
                    .iter()
                    .filter_map(|id| self.tasks.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Find which column holds a task and at what index.
    ///
    pub fn locate(&self, task_id: &TaskId) -> Option<(&ColumnId, usize)> {
        self.ordered_columns()
            .find_map(|column| column.position_of(task_id).map(|idx| (&column.id, idx)))
    }

    /// Check every board invariant and describe each violation found. An
    /// empty result means the board is consistent.
    ///
    pub fn violations(&self) -> Vec<String> {
        let mut problems = vec![];
        let mut seen: HashSet<&TaskId> = HashSet::new();

        for (key, task) in &self.tasks {
            if key != &task.id {
                problems.push(format!("task stored under {} is named {}", key, task.id));
            }
        }
        for (key, column) in &self.columns {
            if key != &column.id {
                problems.push(format!("column stored under {} is named {}", key, column.id));
            }
        }

        for column in self.columns.values() {
            for task_id in &column.task_ids {
                if !self.tasks.contains_key(task_id) {
                    problems.push(format!(
                        "column {} references missing task {}",
                        column.id, task_id
                    ));
                }
                if !seen.insert(task_id) {
                    problems.push(format!("task {} is referenced more than once", task_id));
                }
            }
        }

        for task_id in self.tasks.keys() {
            if !seen.contains(task_id) {
                problems.push(format!("task {} is not in any column", task_id));
            }
        }

        let mut ordered: HashSet<&ColumnId> = HashSet::new();
        for column_id in &self.column_order {
            if !self.columns.contains_key(column_id) {
                problems.push(format!("column order names missing column {}", column_id));
            }
            if !ordered.insert(column_id) {
                problems.push(format!("column {} appears twice in column order", column_id));
            }
        }
        for column_id in self.columns.keys() {
            if !ordered.contains(column_id) {
                problems.push(format!("column {} is missing from column order", column_id));
            }
        }

        problems
    }

    pub fn is_consistent(&self) -> bool {
        self.violations().is_empty()
    }

    /// Repair a board that arrived from outside the engine so that every
    /// invariant holds. Returns a description of each repair made.
    ///
    pub fn normalize(&mut self) -> Vec<String> {
        let mut repairs = vec![];

        // Columns and order refer to records by key, so the key wins.
        for (key, task) in self.tasks.iter_mut() {
            if key != &task.id {
                repairs.push(format!("renamed task {} to its key {}", task.id, key));
                task.id = key.clone();
            }
        }
        for (key, column) in self.columns.iter_mut() {
            if key != &column.id {
                repairs.push(format!("renamed column {} to its key {}", column.id, key));
                column.id = key.clone();
            }
        }

        let mut order: Vec<ColumnId> = vec![];
        for column_id in self.column_order.drain(..) {
            if !self.columns.contains_key(&column_id) {
                repairs.push(format!("dropped unknown column {} from order", column_id));
            } else if order.contains(&column_id) {
                repairs.push(format!("dropped duplicate column {} from order", column_id));
            } else {
                order.push(column_id);
            }
        }
        for column_id in self.columns.keys() {
            if !order.contains(column_id) {
                repairs.push(format!("appended column {} to order", column_id));
                order.push(column_id.clone());
            }
        }
        self.column_order = order;

        let mut seen: HashSet<TaskId> = HashSet::new();
        for column_id in self.column_order.clone() {
            let Some(column) = self.columns.get_mut(&column_id) else {
                continue;
            };
            let tasks = &self.tasks;
            column.task_ids.retain(|task_id| {
                if !tasks.contains_key(task_id) {
                    repairs.push(format!(
                        "removed missing task {} from column {}",
                        task_id, column_id
                    ));
                    false
                } else if !seen.insert(task_id.clone()) {
                    repairs.push(format!(
                        "removed duplicate task {} from column {}",
                        task_id, column_id
                    ));
                    false
                } else {
                    true
                }
            });
        }

        self.tasks.retain(|task_id, _| {
            let referenced = seen.contains(task_id);
            if !referenced {
                repairs.push(format!("dropped task {} not in any column", task_id));
            }
            referenced
        });

        repairs
    }
}
