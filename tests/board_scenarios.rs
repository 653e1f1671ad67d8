use std::sync::Arc;
use teda_board::{
    render, storage::memory_storage::MemoryStorage, AlwaysConfirm, Board, BoardService,
    BoardStore, ColumnId, FixedClock, Filters, KeyValueStore, Priority, PriorityFilter, TaskDraft,
    TaskId, TaskPatch,
};

const KEY: &str = "teda_todo_v1";
const NOW: i64 = 1_700_000_000_000;

async fn open(memory: Arc<MemoryStorage>) -> BoardService<Arc<MemoryStorage>> {
    BoardService::open(BoardStore::new(memory, KEY), FixedClock::new(NOW), AlwaysConfirm).await
}

fn id(s: &str) -> TaskId {
    TaskId::new(s)
}

#[tokio::test]
async fn test_save_load_round_trip_after_mutations() {
    let memory = Arc::new(MemoryStorage::new());
    let mut service = open(memory.clone()).await;

    let created = service
        .create_task(
            TaskDraft::new("Call plumber")
                .with_notes("Kitchen sink")
                .with_priority(Priority::High)
                .in_column(ColumnId::new("inprogress")),
        )
        .await;
    service.toggle_done(&id("example_1"), true).await;
    service.move_task_right(&created).await;

    let reopened = open(memory).await;
    assert_eq!(reopened.board(), service.board());
}

#[tokio::test]
async fn test_move_to_done_appends_last() {
    let mut service = open(Arc::new(MemoryStorage::new())).await;

    service
        .move_task_to_column(&id("example_1"), ColumnId::new("done"))
        .await;

    let last = service.board().tasks.last().unwrap();
    assert_eq!(last.id, id("example_1"));
    assert_eq!(last.column.as_str(), "done");
}

#[tokio::test]
async fn test_priority_change_hides_task_from_high_filter() {
    let mut service = open(Arc::new(MemoryStorage::new())).await;

    service
        .update_task(&id("example_2"), TaskPatch::priority(Priority::Low))
        .await;

    let filters = Filters::new("", PriorityFilter::Only(Priority::High));
    let view = render(service.board(), &filters, None);

    assert!(!view.visible_ids().contains(&&id("example_2")));
    assert!(service.board().contains_task(&id("example_2")));
}

#[tokio::test]
async fn test_create_with_empty_title_stores_empty_string() {
    let mut service = open(Arc::new(MemoryStorage::new())).await;

    let created = service
        .create_task(TaskDraft::new("").in_column(ColumnId::todo()))
        .await;

    assert_eq!(service.task(&created).unwrap().title, "");
}

#[tokio::test]
async fn test_left_then_right_returns_to_original_column() {
    let mut service = open(Arc::new(MemoryStorage::new())).await;
    let original = service.task(&id("example_2")).unwrap().column.clone();

    service.move_task_left(&id("example_2")).await;
    service.move_task_right(&id("example_2")).await;

    assert_eq!(service.task(&id("example_2")).unwrap().column, original);
}

#[tokio::test]
async fn test_delete_shrinks_board_by_one() {
    let mut service = open(Arc::new(MemoryStorage::new())).await;
    let before = service.board().tasks.len();

    service.delete_task(&id("example_3")).await;

    assert!(service.task(&id("example_3")).is_none());
    assert_eq!(service.board().tasks.len(), before - 1);
}

#[tokio::test]
async fn test_clear_completed_keeps_open_tasks_in_order() {
    let mut service = open(Arc::new(MemoryStorage::new())).await;
    for title in ["a", "b", "c"] {
        service.create_task(TaskDraft::new(title)).await;
    }
    let b = service.board().tasks[4].id.clone();
    service.toggle_done(&b, true).await;

    let expected: Vec<TaskId> = service
        .board()
        .tasks
        .iter()
        .filter(|t| !t.done)
        .map(|t| t.id.clone())
        .collect();

    service.clear_completed().await;

    let survivors: Vec<TaskId> = service.board().tasks.iter().map(|t| t.id.clone()).collect();
    assert_eq!(survivors, expected);
    assert!(service.board().tasks.iter().all(|t| !t.done));
}

#[tokio::test]
async fn test_corrupt_blob_recovers_seed_board() {
    let memory = Arc::new(MemoryStorage::new());
    memory.set(KEY, "not a board").await.unwrap();

    let service = open(memory).await;

    assert_eq!(service.board(), &Board::seed(NOW));
}
