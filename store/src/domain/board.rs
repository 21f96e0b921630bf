//! Board Entity
//!
//! A board owns an ordered sequence of task lists.

use serde::{Deserialize, Serialize};
use super::entity::Entity;
use super::task_list::TaskList;

/// A named board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: u32,
    pub title: String,
    /// Creation time, unix millis
    pub created_at: i64,
}

impl Board {
    pub fn new(id: u32, title: String) -> Self {
        Self {
            id,
            title,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

impl Entity for Board {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Full ordered contents of a board: lists by position, each with its tasks by position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub board: Board,
    pub lists: Vec<TaskList>,
}

impl BoardSnapshot {
    pub fn task_count(&self) -> usize {
        self.lists.iter().map(|l| l.tasks.len()).sum()
    }
}
