use crate::{
    clock::Clock,
    domain::Board,
    error::{Result, TedaError},
};
use async_trait::async_trait;
use tracing::{debug, error, warn};

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory_storage;

/// Durable key-value slot the board blob is kept in
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, `None` if the slot is empty
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }
}

/// Loads and saves the whole board as one JSON blob under a fixed key.
///
/// Neither direction fails towards the caller: an unreadable blob falls
/// back to the seed board and a failed write is reported as `false`.
pub struct BoardStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> BoardStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Loads the stored board, or a fresh seed board if the slot is empty
    /// or its contents cannot be parsed.
    pub async fn load(&self, clock: &dyn Clock) -> Board {
        match self.try_load().await {
            Ok(Some(board)) => {
                debug!(key = %self.key, tasks = board.tasks.len(), "loaded board");
                board
            }
            Ok(None) => {
                debug!(key = %self.key, "no stored board, using seed board");
                Board::seed(clock.now_millis())
            }
            Err(err) => {
                error!(key = %self.key, error = %err, "failed to load board, using seed board");
                Board::seed(clock.now_millis())
            }
        }
    }

    async fn try_load(&self) -> Result<Option<Board>> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let board: Board =
            serde_json::from_str(&raw).map_err(|e| TedaError::StorageRead(e.to_string()))?;
        Ok(Some(board))
    }

    /// Serializes and writes the full board. Returns false on failure.
    pub async fn save(&self, board: &Board) -> bool {
        match self.try_save(board).await {
            Ok(()) => true,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to save board");
                false
            }
        }
    }

    async fn try_save(&self, board: &Board) -> Result<()> {
        let json = serde_json::to_string(board)?;
        self.store.set(&self.key, &json).await
    }
}

#[cfg(test)]
mod tests {
    use super::memory_storage::MemoryStorage;
    use super::*;
    use crate::clock::FixedClock;
    use crate::domain::{ColumnId, TaskId};

    const KEY: &str = "teda_todo_v1";

    #[tokio::test]
    async fn test_load_empty_returns_seed() {
        let store = BoardStore::new(MemoryStorage::new(), KEY);
        let board = store.load(&FixedClock::new(1_000)).await;

        assert_eq!(board, Board::seed(1_000));
    }

    #[tokio::test]
    async fn test_load_corrupt_returns_seed() {
        let memory = MemoryStorage::new();
        memory.set(KEY, "{not json").await.unwrap();
        let store = BoardStore::new(memory, KEY);

        let board = store.load(&FixedClock::new(5)).await;
        assert_eq!(board, Board::seed(5));
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let store = BoardStore::new(MemoryStorage::new(), KEY);
        let mut board = Board::seed(1_000);
        board.move_task(&TaskId::new("example_1"), ColumnId::new("done"));
        board.tasks[0].notes = None;

        assert!(store.save(&board).await);
        let loaded = store.load(&FixedClock::new(0)).await;

        assert_eq!(loaded, board);
    }

    #[tokio::test]
    async fn test_save_failure_returns_false() {
        let memory = MemoryStorage::new();
        memory.fail_writes(true);
        let store = BoardStore::new(memory, KEY);

        assert!(!store.save(&Board::seed(0)).await);
        assert_eq!(store.inner().get(KEY).await.unwrap(), None);
    }
}
