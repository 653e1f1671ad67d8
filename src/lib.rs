//! # Teda Board
//!
//! Board model, mutation service and view projection for a single-user
//! kanban to-do board.
//!
//! Data flows one way: a gesture reaches the [`BoardController`], which
//! calls the [`BoardService`]; the service mutates the board, persists it
//! through a [`KeyValueStore`], and the controller re-renders the board
//! into a [`BoardView`].

pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod interaction;
pub mod logging;
pub mod service;
pub mod storage;
pub mod view;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::StoreConfig;
pub use domain::{
    board::{Board, Column, ColumnId},
    filter::{Filters, PriorityFilter},
    task::{Priority, Task, TaskDraft, TaskId, TaskPatch},
};
pub use error::{Result, TedaError};
pub use interaction::{BoardController, RenderTarget, TaskKey};
pub use service::{AlwaysConfirm, BoardService, Confirm, Outcome};
pub use storage::{BoardStore, KeyValueStore};
pub use view::{render, BoardView, ColumnView, TaskView};
