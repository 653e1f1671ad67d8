use crate::domain::task::{Priority, Task, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;

const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Short identifier of a board column (e.g., `todo`, `inprogress`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub const TODO: &'static str = "todo";
    pub const IN_PROGRESS: &'static str = "inprogress";
    pub const DONE: &'static str = "done";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Column new tasks land in when none is given
    pub fn todo() -> Self {
        Self::new(Self::TODO)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A board column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
}

impl Column {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: ColumnId::new(id),
            title: title.to_string(),
        }
    }
}

/// Board aggregate: the unit of persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
    pub tasks: Vec<Task>,
}

impl Board {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            tasks: Vec::new(),
        }
    }

    /// The fixed column set: To Do, In Progress, Done
    pub fn default_columns() -> Vec<Column> {
        vec![
            Column::new(ColumnId::TODO, "To Do"),
            Column::new(ColumnId::IN_PROGRESS, "In Progress"),
            Column::new(ColumnId::DONE, "Done"),
        ]
    }

    /// Seed board used when nothing usable is stored yet.
    ///
    /// `now` is the current time in epoch milliseconds; example tasks are
    /// back-dated relative to it.
    pub fn seed(now: i64) -> Self {
        let example = |id: &str, title: &str, notes: &str, priority, column: &str, created| Task {
            id: TaskId::new(id),
            title: title.to_string(),
            notes: Some(notes.to_string()),
            done: column == ColumnId::DONE,
            priority,
            column: ColumnId::new(column),
            created,
        };

        Self {
            columns: Self::default_columns(),
            tasks: vec![
                example(
                    "example_1",
                    "Plan your day",
                    "Add a few tasks you care about and prioritize them.",
                    Priority::Medium,
                    ColumnId::TODO,
                    now,
                ),
                example(
                    "example_2",
                    "Design hero section",
                    "Sketch layout and gather assets.",
                    Priority::High,
                    ColumnId::IN_PROGRESS,
                    now - HOUR_MS,
                ),
                example(
                    "example_3",
                    "Weekly review",
                    "Reflect on wins and blockers from the week.",
                    Priority::Low,
                    ColumnId::DONE,
                    now - DAY_MS,
                ),
            ],
        }
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| &t.id == id)
    }

    pub fn contains_task(&self, id: &TaskId) -> bool {
        self.task(id).is_some()
    }

    pub fn has_column(&self, id: &ColumnId) -> bool {
        self.columns.iter().any(|c| &c.id == id)
    }

    /// Position of a column in the fixed left-to-right order
    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    /// Tasks assigned to a column, in board order
    pub fn tasks_in_column<'a>(&'a self, id: &'a ColumnId) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| &t.column == id)
    }

    /// Column immediately left of the task's current column, if any
    pub fn column_left_of(&self, task_id: &TaskId) -> Option<&ColumnId> {
        let idx = self.column_index(&self.task(task_id)?.column)?;
        idx.checked_sub(1).map(|i| &self.columns[i].id)
    }

    /// Column immediately right of the task's current column, if any.
    ///
    /// A task in a column that is not on the board sits before the first
    /// column, so its right neighbour is the first column.
    pub fn column_right_of(&self, task_id: &TaskId) -> Option<&ColumnId> {
        let next = match self.column_index(&self.task(task_id)?.column) {
            Some(idx) => idx + 1,
            None => 0,
        };
        self.columns.get(next).map(|c| &c.id)
    }

    /// Reassigns a task and re-appends it to the end of the task sequence.
    /// Returns false if the task does not exist.
    pub fn move_task(&mut self, id: &TaskId, column: ColumnId) -> bool {
        let Some(pos) = self.tasks.iter().position(|t| &t.id == id) else {
            return false;
        };
        let mut task = self.tasks.remove(pos);
        task.column = column;
        self.tasks.push(task);
        true
    }

    /// Removes a task. Returns false if it does not exist.
    pub fn remove_task(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| &t.id != id);
        self.tasks.len() < before
    }

    /// Drops every completed task, keeping the order of the rest.
    /// Returns how many were removed.
    pub fn remove_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.done);
        before - self.tasks.len()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Self::default_columns())
    }
}
