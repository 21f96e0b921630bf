//! Client Models
//!
//! Data structures matching the store entities.

use serde::{Deserialize, Serialize};

/// Board data structure (matches store)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: u32,
    pub title: String,
    pub created_at: i64,
}

/// Task data structure (matches store)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub list_id: u32,
    pub name: String,
    pub completed: bool,
    pub position: i32,
}

/// Task list with its tasks (matches store)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: u32,
    pub board_id: u32,
    pub name: String,
    pub position: i32,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Full board contents as returned by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub board: Board,
    pub lists: Vec<TaskList>,
}

impl TaskList {
    pub fn task(&self, task_id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }
}
