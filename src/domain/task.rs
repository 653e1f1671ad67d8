use crate::domain::board::ColumnId;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Opaque task identifier (e.g., `task_lx2k9f0a_4h1c9z`, `example_1`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = crate::error::TedaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(crate::error::TedaError::InvalidPriority(s.to_string())),
        }
    }
}

/// A task on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub priority: Priority,
    pub column: ColumnId,
    /// Creation time in epoch milliseconds
    pub created: i64,
}

impl Task {
    /// Builds a task from a draft. `done` always starts false; a missing or
    /// empty column falls back to To Do.
    pub fn from_draft(id: TaskId, draft: TaskDraft, created: i64) -> Self {
        Self {
            id,
            title: draft.title,
            notes: draft.notes,
            done: false,
            priority: draft.priority.unwrap_or_default(),
            column: draft
                .column
                .filter(|c| !c.as_str().is_empty())
                .unwrap_or_else(ColumnId::todo),
            created,
        }
    }

    /// Merges the fields present in `patch`. Never touches `id`, `column` or `created`.
    /// Empty notes clear the notes.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(notes) = patch.notes {
            self.notes = (!notes.is_empty()).then_some(notes);
        }
        if let Some(done) = patch.done {
            self.done = done;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }

    /// Case-insensitive substring match over title and notes
    pub fn matches_search(&self, query: &str) -> bool {
        let query_lower = query.to_lowercase();
        self.title.to_lowercase().contains(&query_lower)
            || self
                .notes
                .as_ref()
                .map(|n| n.to_lowercase().contains(&query_lower))
                .unwrap_or(false)
    }
}

/// Input for creating a task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub notes: Option<String>,
    pub priority: Option<Priority>,
    pub column: Option<ColumnId>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn in_column(mut self, column: ColumnId) -> Self {
        self.column = Some(column);
        self
    }
}

/// Partial update for an existing task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub done: Option<bool>,
    pub priority: Option<Priority>,
}

impl TaskPatch {
    pub fn priority(priority: Priority) -> Self {
        Self {
            priority: Some(priority),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.notes.is_none()
            && self.done.is_none()
            && self.priority.is_none()
    }
}
