//! Board mutation operations.
//!
//! The service owns the single board instance for the session. Every
//! mutating operation changes the in-memory board first and then persists
//! the whole board; a failed save is logged and the in-memory change stands.

use crate::{
    clock::{uid, Clock},
    domain::{Board, ColumnId, Task, TaskDraft, TaskId, TaskPatch},
    service::Confirm,
    storage::{BoardStore, KeyValueStore},
};
use tracing::{debug, info, warn};

const TASK_ID_PREFIX: &str = "task";
const DELETE_PROMPT: &str = "Delete this task?";
const CLEAR_COMPLETED_PROMPT: &str = "Remove all completed tasks?";

/// Result of a single-task operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The board was changed and persisted
    Applied,
    /// No task with the given id exists
    NotFound,
    /// The confirmation gate said no
    Declined,
    /// The task was found but there was nothing to do (e.g., already at the edge)
    Unchanged,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

pub struct BoardService<S> {
    store: BoardStore<S>,
    clock: Box<dyn Clock>,
    confirm: Box<dyn Confirm>,
    board: Board,
    last_save_ok: bool,
}

impl<S: KeyValueStore> BoardService<S> {
    /// Loads the board from `store` (or the seed board) and takes ownership of it
    pub async fn open(
        store: BoardStore<S>,
        clock: impl Clock + 'static,
        confirm: impl Confirm + 'static,
    ) -> Self {
        let board = store.load(&clock).await;
        info!(
            key = store.key(),
            columns = board.columns.len(),
            tasks = board.tasks.len(),
            "board opened"
        );
        Self {
            store,
            clock: Box::new(clock),
            confirm: Box::new(confirm),
            board,
            last_save_ok: true,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Deep copy of the current board
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.board.task(id)
    }

    /// Whether the most recent save reached durable storage
    pub fn last_save_ok(&self) -> bool {
        self.last_save_ok
    }

    pub fn set_confirm(&mut self, confirm: impl Confirm + 'static) {
        self.confirm = Box::new(confirm);
    }

    /// Appends a new task with a fresh id. The title is stored as given,
    /// empty included.
    pub async fn create_task(&mut self, draft: TaskDraft) -> TaskId {
        let now = self.clock.now_millis();
        let id = loop {
            let candidate = TaskId::new(uid(TASK_ID_PREFIX, now));
            if !self.board.contains_task(&candidate) {
                break candidate;
            }
        };

        let task = Task::from_draft(id.clone(), draft, now);
        if !self.board.has_column(&task.column) {
            warn!(task_id = %id, column = %task.column, "task created in unknown column");
        }
        info!(task_id = %id, column = %task.column, "task created");
        self.board.tasks.push(task);
        self.persist().await;
        id
    }

    /// Merges `patch` into the task. Id, column and creation time are kept.
    pub async fn update_task(&mut self, id: &TaskId, patch: TaskPatch) -> Outcome {
        let Some(task) = self.board.task_mut(id) else {
            debug!(task_id = %id, "update skipped, task not found");
            return Outcome::NotFound;
        };
        if patch.is_empty() {
            return Outcome::Unchanged;
        }
        task.apply(patch);
        info!(task_id = %id, "task updated");
        self.persist().await;
        Outcome::Applied
    }

    /// Removes the task after confirmation
    pub async fn delete_task(&mut self, id: &TaskId) -> Outcome {
        if !self.board.contains_task(id) {
            debug!(task_id = %id, "delete skipped, task not found");
            return Outcome::NotFound;
        }
        if !self.confirm.confirm(DELETE_PROMPT) {
            debug!(task_id = %id, "delete declined");
            return Outcome::Declined;
        }
        self.board.remove_task(id);
        info!(task_id = %id, "task deleted");
        self.persist().await;
        Outcome::Applied
    }

    pub async fn toggle_done(&mut self, id: &TaskId, done: bool) -> Outcome {
        let Some(task) = self.board.task_mut(id) else {
            debug!(task_id = %id, "toggle skipped, task not found");
            return Outcome::NotFound;
        };
        task.done = done;
        info!(task_id = %id, done, "task completion set");
        self.persist().await;
        Outcome::Applied
    }

    /// Assigns the task to `column` and moves it to the end of the task list.
    ///
    /// The column id is not checked against the board: an unknown id leaves
    /// the task assigned to a column that is never rendered.
    pub async fn move_task_to_column(&mut self, id: &TaskId, column: ColumnId) -> Outcome {
        if !self.board.has_column(&column) {
            warn!(task_id = %id, column = %column, "moving task to unknown column");
        }
        let column_name = column.to_string();
        if !self.board.move_task(id, column) {
            debug!(task_id = %id, "move skipped, task not found");
            return Outcome::NotFound;
        }
        info!(task_id = %id, column = %column_name, "task moved");
        self.persist().await;
        Outcome::Applied
    }

    /// Moves the task one column to the left; no-op in the first column
    pub async fn move_task_left(&mut self, id: &TaskId) -> Outcome {
        if !self.board.contains_task(id) {
            return Outcome::NotFound;
        }
        match self.board.column_left_of(id).cloned() {
            Some(target) => self.move_task_to_column(id, target).await,
            None => Outcome::Unchanged,
        }
    }

    /// Moves the task one column to the right; no-op in the last column.
    /// A task in an unknown column moves into the first column.
    pub async fn move_task_right(&mut self, id: &TaskId) -> Outcome {
        if !self.board.contains_task(id) {
            return Outcome::NotFound;
        }
        match self.board.column_right_of(id).cloned() {
            Some(target) => self.move_task_to_column(id, target).await,
            None => Outcome::Unchanged,
        }
    }

    /// Removes every completed task after confirmation.
    ///
    /// Returns the number removed, or `None` when declined.
    pub async fn clear_completed(&mut self) -> Option<usize> {
        if !self.confirm.confirm(CLEAR_COMPLETED_PROMPT) {
            debug!("clear completed declined");
            return None;
        }
        let removed = self.board.remove_completed();
        info!(removed, "completed tasks cleared");
        self.persist().await;
        Some(removed)
    }

    async fn persist(&mut self) {
        self.last_save_ok = self.store.save(&self.board).await;
        if !self.last_save_ok {
            warn!("board kept in memory only; durable copy is stale");
        }
    }
}
