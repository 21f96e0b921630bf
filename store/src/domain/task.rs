//! Task Entity

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// A single task inside a task list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub list_id: u32,
    pub name: String,
    pub completed: bool,
    /// Position within the owning list (dense, 0-based)
    pub position: i32,
}

impl Task {
    pub fn new(id: u32, list_id: u32, name: String, position: i32) -> Self {
        Self {
            id,
            list_id,
            name,
            completed: false,
            position,
        }
    }
}

impl Entity for Task {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let task = Task::new(3, 1, "Write docs".to_string(), 2);
        assert_eq!(task.id(), 3);
        assert_eq!(task.list_id, 1);
        assert!(!task.completed);
        assert_eq!(task.position, 2);
    }

    #[test]
    fn test_task_serialization() {
        let task = Task::new(1, 7, "Ship".to_string(), 0);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["list_id"], 7);
        assert_eq!(json["completed"], false);
    }
}
