//! Gesture handling.
//!
//! [`BoardController`] turns discrete UI events into board service calls and
//! re-renders the whole board into its [`RenderTarget`] after every event.
//! Drag-and-drop and pick mode are two ways of producing the same
//! `move_task_to_column` call.

pub mod gestures;

use crate::{
    domain::{ColumnId, Filters, Priority, PriorityFilter, TaskDraft, TaskId, TaskPatch},
    service::{BoardService, Outcome},
    storage::KeyValueStore,
    view::{self, BoardView},
};
use tracing::debug;

pub use gestures::{resolve_drop, DragState, PickState, TaskKey};

/// Receives a fresh view-model after every handled event
pub trait RenderTarget {
    fn render(&mut self, view: &BoardView);
}

impl<F> RenderTarget for F
where
    F: FnMut(&BoardView),
{
    fn render(&mut self, view: &BoardView) {
        self(view)
    }
}

/// Which task editor is open
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Closed,
    New { column: Option<ColumnId> },
    Edit { id: TaskId },
}

/// Contents of the task editor form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub notes: String,
    pub done: bool,
    pub priority: Priority,
}

/// What a form submission did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Created(TaskId),
    Updated(Outcome),
    /// No editor was open
    Ignored,
}

pub struct BoardController<S, R> {
    service: BoardService<S>,
    target: R,
    filters: Filters,
    pick: PickState,
    drag: DragState,
    modal: Modal,
}

impl<S: KeyValueStore, R: RenderTarget> BoardController<S, R> {
    pub fn new(service: BoardService<S>, target: R) -> Self {
        Self {
            service,
            target,
            filters: Filters::default(),
            pick: PickState::default(),
            drag: DragState::default(),
            modal: Modal::Closed,
        }
    }

    pub fn service(&self) -> &BoardService<S> {
        &self.service
    }

    pub fn target(&self) -> &R {
        &self.target
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn armed(&self) -> Option<&TaskId> {
        self.pick.armed()
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// Current view-model without pushing it to the render target
    pub fn view(&self) -> BoardView {
        view::render(self.service.board(), &self.filters, self.pick.armed())
    }

    pub fn render(&mut self) {
        let view = self.view();
        self.target.render(&view);
    }

    /// Replaces both filter inputs at once
    pub fn set_filters(&mut self, filters: Filters) {
        self.filters = filters;
        self.render();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
        self.render();
    }

    pub fn set_priority_filter(&mut self, priority: PriorityFilter) {
        self.filters.priority = priority;
        self.render();
    }

    pub fn drag_start(&mut self, id: TaskId) {
        self.drag.start(id);
    }

    pub fn drag_end(&mut self) {
        self.drag.end();
    }

    /// A drop landed on `column`. `payload` is the task id carried by the
    /// drag data, when the platform provides one.
    pub async fn drop_on(&mut self, column: ColumnId, payload: Option<TaskId>) -> Outcome {
        let Some(id) = resolve_drop(payload, &self.drag, &mut self.pick) else {
            debug!(column = %column, "drop ignored, nothing to move");
            return Outcome::Unchanged;
        };
        let outcome = self.service.move_task_to_column(&id, column).await;
        self.render();
        outcome
    }

    /// Pick button on a task card
    pub fn pick(&mut self, id: TaskId) {
        self.pick.toggle(id);
        self.render();
    }

    /// Escape closes the editor if open, otherwise cancels pick mode
    pub fn escape(&mut self) {
        if self.modal != Modal::Closed {
            self.close_modal();
        } else if self.pick.armed().is_some() {
            self.pick.clear();
            self.render();
        }
    }

    pub async fn key_on_task(&mut self, id: &TaskId, key: TaskKey) -> Outcome {
        match key {
            TaskKey::ArrowLeft => self.move_left(id).await,
            TaskKey::ArrowRight => self.move_right(id).await,
            TaskKey::Delete => self.delete(id).await,
        }
    }

    pub async fn move_left(&mut self, id: &TaskId) -> Outcome {
        let outcome = self.service.move_task_left(id).await;
        self.render_if(outcome);
        outcome
    }

    pub async fn move_right(&mut self, id: &TaskId) -> Outcome {
        let outcome = self.service.move_task_right(id).await;
        self.render_if(outcome);
        outcome
    }

    /// Done checkbox changed
    pub async fn set_done(&mut self, id: &TaskId, done: bool) -> Outcome {
        let outcome = self.service.toggle_done(id, done).await;
        self.render_if(outcome);
        outcome
    }

    pub async fn delete(&mut self, id: &TaskId) -> Outcome {
        let outcome = self.service.delete_task(id).await;
        if outcome.is_applied() {
            if self.pick.armed() == Some(id) {
                self.pick.clear();
            }
            self.render();
        }
        outcome
    }

    pub async fn clear_completed(&mut self) -> Option<usize> {
        let removed = self.service.clear_completed().await;
        if removed.is_some() {
            let armed_gone = self
                .pick
                .armed()
                .is_some_and(|id| !self.service.board().contains_task(id));
            if armed_gone {
                self.pick.clear();
            }
            self.render();
        }
        removed
    }

    /// Opens an empty editor; new tasks go to `column`, or To Do
    pub fn open_new(&mut self, column: Option<ColumnId>) -> TaskForm {
        self.modal = Modal::New { column };
        TaskForm::default()
    }

    /// Opens the editor prefilled from an existing task
    pub fn open_edit(&mut self, id: &TaskId) -> Option<TaskForm> {
        let task = self.service.task(id)?;
        let form = TaskForm {
            title: task.title.clone(),
            notes: task.notes.clone().unwrap_or_default(),
            done: task.done,
            priority: task.priority,
        };
        self.modal = Modal::Edit { id: id.clone() };
        Some(form)
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }

    /// Submits the open editor. Title and notes are trimmed; an empty title
    /// is stored as-is. The editor closes afterwards.
    pub async fn submit(&mut self, form: TaskForm) -> Submitted {
        let title = form.title.trim().to_string();
        let notes = form.notes.trim().to_string();

        let submitted = match std::mem::take(&mut self.modal) {
            Modal::Closed => return Submitted::Ignored,
            Modal::Edit { id } => {
                let patch = TaskPatch {
                    title: Some(title),
                    notes: Some(notes),
                    done: Some(form.done),
                    priority: Some(form.priority),
                };
                Submitted::Updated(self.service.update_task(&id, patch).await)
            }
            Modal::New { column } => {
                let draft = TaskDraft {
                    title,
                    notes: (!notes.is_empty()).then_some(notes),
                    priority: Some(form.priority),
                    column: Some(column.unwrap_or_else(ColumnId::todo)),
                };
                Submitted::Created(self.service.create_task(draft).await)
            }
        };
        self.render();
        submitted
    }

    fn render_if(&mut self, outcome: Outcome) {
        if outcome.is_applied() {
            self.render();
        }
    }
}
