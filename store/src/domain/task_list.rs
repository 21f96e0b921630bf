//! TaskList Entity
//!
//! An ordered column of tasks inside a board.

use serde::{Deserialize, Serialize};
use super::entity::Entity;
use super::task::Task;

/// A task list with its position inside the owning board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: u32,
    pub board_id: u32,
    pub name: String,
    /// Position within the board (dense, 0-based)
    pub position: i32,
    /// Tasks ordered by position; only filled in snapshots
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(id: u32, board_id: u32, name: String, position: i32) -> Self {
        Self {
            id,
            board_id,
            name,
            position,
            tasks: Vec::new(),
        }
    }
}

impl Entity for TaskList {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
