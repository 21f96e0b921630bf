//! Move Engine
//!
//! Cross-list task moves: remove from the source with compaction, then
//! splice into the target. Lists never move between boards.

use crate::models::{Task, TaskList};
use crate::position::index_of;
use crate::reorder;

#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    /// The task as it landed (new list id and position, same id)
    pub task: Task,
    /// Position the task held in the source list
    pub from_position: i32,
}

/// Move a task from one list to another at `index` (clamped).
///
/// Returns `None` and leaves every list untouched when the lists are the
/// same, either list is missing, or the task is not in the source list.
pub fn move_task(
    lists: &mut [TaskList],
    task_id: u32,
    from_list: u32,
    to_list: u32,
    index: i32,
) -> Option<MoveOutcome> {
    if from_list == to_list {
        return None;
    }
    let from = lists.iter().position(|l| l.id == from_list)?;
    let to = lists.iter().position(|l| l.id == to_list)?;
    index_of(&lists[from].tasks, task_id)?;

    let mut task = reorder::remove(&mut lists[from].tasks, task_id)?;
    let from_position = task.position;
    task.list_id = to_list;
    let landed = reorder::insert_at(&mut lists[to].tasks, task, index);

    let task = lists[to].tasks.get(landed as usize)?.clone();
    Some(MoveOutcome {
        task,
        from_position,
    })
}
