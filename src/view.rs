//! Pure projection from the board to a declarative view-model.
//!
//! Rendering recomputes everything on each call. A UI layer materializes
//! the returned [`BoardView`] however it likes.

use crate::{
    clock::format_timestamp,
    domain::{Board, ColumnId, Filters, Priority, Task, TaskId},
};
use serde::Serialize;

/// Title shown for tasks stored with an empty title
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
    pub armed: Option<TaskId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView {
    pub id: ColumnId,
    pub title: String,
    /// All tasks assigned to the column, regardless of filters
    pub count: usize,
    /// Tasks assigned to the column that pass the filters
    pub visible_count: usize,
    pub tasks: Vec<TaskView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub id: TaskId,
    pub title: String,
    pub notes: String,
    pub priority: Priority,
    pub done: bool,
    pub created: String,
    pub armed: bool,
}

impl TaskView {
    fn from_task(task: &Task, armed: Option<&TaskId>) -> Self {
        let title = if task.title.is_empty() {
            UNTITLED.to_string()
        } else {
            task.title.clone()
        };
        Self {
            id: task.id.clone(),
            title,
            notes: task.notes.clone().unwrap_or_default(),
            priority: task.priority,
            done: task.done,
            created: format_timestamp(task.created),
            armed: armed == Some(&task.id),
        }
    }
}

impl BoardView {
    pub fn column(&self, id: &str) -> Option<&ColumnView> {
        self.columns.iter().find(|c| c.id.as_str() == id)
    }

    /// Ids of every visible task, column by column
    pub fn visible_ids(&self) -> Vec<&TaskId> {
        self.columns
            .iter()
            .flat_map(|c| c.tasks.iter().map(|t| &t.id))
            .collect()
    }
}

/// Projects the board through `filters`, flagging the armed task if any.
///
/// Columns keep board order; tasks within a column keep task-list order.
/// Tasks whose column is not on the board are not rendered.
pub fn render(board: &Board, filters: &Filters, armed: Option<&TaskId>) -> BoardView {
    let columns = board
        .columns
        .iter()
        .map(|col| {
            let assigned: Vec<&Task> = board.tasks_in_column(&col.id).collect();
            let tasks: Vec<TaskView> = assigned
                .iter()
                .filter(|t| filters.matches(t))
                .map(|t| TaskView::from_task(t, armed))
                .collect();
            ColumnView {
                id: col.id.clone(),
                title: col.title.clone(),
                count: assigned.len(),
                visible_count: tasks.len(),
                tasks,
            }
        })
        .collect();

    BoardView {
        columns,
        armed: armed.cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PriorityFilter, TaskDraft};

    fn board() -> Board {
        Board::seed(1_700_000_000_000)
    }

    #[test]
    fn test_render_groups_by_column() {
        let view = render(&board(), &Filters::default(), None);

        assert_eq!(view.columns.len(), 3);
        assert_eq!(view.column("todo").unwrap().tasks[0].title, "Plan your day");
        assert_eq!(view.column("inprogress").unwrap().tasks[0].id.as_str(), "example_2");
        assert!(view.column("done").unwrap().tasks[0].done);
        assert!(view.armed.is_none());
    }

    #[test]
    fn test_counts_ignore_filters() {
        let filters = Filters::new("", PriorityFilter::Only(Priority::High));
        let view = render(&board(), &filters, None);

        let todo = view.column("todo").unwrap();
        assert_eq!(todo.count, 1);
        assert_eq!(todo.visible_count, 0);
        assert!(todo.tasks.is_empty());

        let in_progress = view.column("inprogress").unwrap();
        assert_eq!(in_progress.count, 1);
        assert_eq!(in_progress.visible_count, 1);
    }

    #[test]
    fn test_empty_title_displays_untitled() {
        let mut board = board();
        board.tasks.push(Task::from_draft(TaskId::new("t1"), TaskDraft::new(""), 0));

        let view = render(&board, &Filters::default(), None);
        let todo = view.column("todo").unwrap();

        assert_eq!(todo.tasks.last().unwrap().title, UNTITLED);
        assert_eq!(todo.tasks.last().unwrap().created, "");
        assert_eq!(board.tasks.last().unwrap().title, "");
    }

    #[test]
    fn test_armed_task_is_flagged() {
        let armed = TaskId::new("example_2");
        let view = render(&board(), &Filters::default(), Some(&armed));

        let flagged: Vec<_> = view
            .columns
            .iter()
            .flat_map(|c| c.tasks.iter())
            .filter(|t| t.armed)
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(flagged, vec!["example_2"]);
        assert_eq!(view.armed, Some(armed));
    }

    #[test]
    fn test_orphaned_tasks_not_rendered() {
        let mut board = board();
        board.move_task(&TaskId::new("example_1"), ColumnId::new("archive"));

        let view = render(&board, &Filters::default(), None);

        assert_eq!(view.visible_ids().len(), 2);
        assert_eq!(view.column("todo").unwrap().count, 0);
    }

    #[test]
    fn test_task_order_within_column() {
        let mut board = board();
        board.move_task(&TaskId::new("example_1"), ColumnId::new("done"));

        let view = render(&board, &Filters::default(), None);
        let done: Vec<_> = view
            .column("done")
            .unwrap()
            .tasks
            .iter()
            .map(|t| t.id.as_str())
            .collect();

        assert_eq!(done, vec!["example_3", "example_1"]);
    }
}
