pub mod board;
pub mod filter;
pub mod task;

pub use board::{Board, Column, ColumnId};
pub use filter::{Filters, PriorityFilter};
pub use task::{Priority, Task, TaskDraft, TaskId, TaskPatch};
