//! Task Board Store
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and SQLite implementations
//! - commands: Operation handlers consumed by clients

use std::path::Path;

pub mod domain;
pub mod repository;
pub mod commands;

use repository::{init_db, BoardRepository, DbState, TaskListRepository, TaskRepository};

/// Application state shared across commands
pub struct AppState {
    pub db_state: DbState,
    pub board_repo: BoardRepository,
    pub list_repo: TaskListRepository,
    pub task_repo: TaskRepository,
}

impl AppState {
    pub fn new(db_state: DbState) -> Self {
        Self {
            board_repo: BoardRepository::new(db_state.conn.clone()),
            list_repo: TaskListRepository::new(db_state.conn.clone()),
            task_repo: TaskRepository::new(db_state.conn.clone()),
            db_state,
        }
    }

    /// Open the database at `db_path` (`:memory:` for a private in-memory store)
    pub async fn open(db_path: &Path) -> Result<Self, String> {
        let db_state = init_db(db_path).await?;
        Ok(Self::new(db_state))
    }
}
