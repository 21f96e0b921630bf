//! Task Commands
//!
//! Task CRUD plus the swap and insert-at operations used by drag and drop.

use crate::domain::{DomainResult, Task};
use crate::repository::{Repository, TaskPositioningOperations};
use crate::AppState;

/// Append a new task at the end of a list
pub async fn create_task(state: &AppState, list_id: u32, board_id: u32, name: String) -> DomainResult<Task> {
    state.list_repo.find_in_board(board_id, list_id).await?;
    let task = state.task_repo.create(&Task::new(0, list_id, name, 0)).await?;
    log::debug!("Created task {} in list {} at position {}", task.id, list_id, task.position);
    Ok(task)
}

pub async fn rename_task(
    state: &AppState,
    board_id: u32,
    list_id: u32,
    task_id: u32,
    name: String,
) -> DomainResult<Task> {
    state.list_repo.find_in_board(board_id, list_id).await?;
    let mut task = state.task_repo.find_in_list(list_id, task_id).await?;
    task.name = name;
    state.task_repo.update(&task).await
}

pub async fn set_task_completed(
    state: &AppState,
    board_id: u32,
    list_id: u32,
    task_id: u32,
    completed: bool,
) -> DomainResult<Task> {
    state.list_repo.find_in_board(board_id, list_id).await?;
    state.task_repo.set_completed(list_id, task_id, completed).await
}

/// Delete a task; later tasks in the list move up one position
pub async fn delete_task(state: &AppState, board_id: u32, list_id: u32, task_id: u32) -> DomainResult<()> {
    state.list_repo.find_in_board(board_id, list_id).await?;
    state.task_repo.delete_from_list(list_id, task_id).await
}

/// Insert a task payload into a list at `index`, shifting later tasks
pub async fn insert_task_at(
    state: &AppState,
    board_id: u32,
    list_id: u32,
    index: i32,
    payload: Task,
) -> DomainResult<Task> {
    state.list_repo.find_in_board(board_id, list_id).await?;
    state.task_repo.insert_at(list_id, index, &payload).await
}

/// Exchange the tasks at two absolute positions of a list
pub async fn swap_task_positions(state: &AppState, list_id: u32, a: i32, b: i32) -> DomainResult<()> {
    let result = state.task_repo.swap_positions(list_id, a, b).await;
    if let Err(e) = &result {
        log::warn!("Swap of task positions {} and {} in list {} rejected: {}", a, b, list_id, e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create_board, create_task_list, fetch_board_snapshot};
    use std::path::Path;

    async fn setup() -> AppState {
        AppState::open(Path::new(":memory:")).await.expect("Failed to open store")
    }

    #[tokio::test]
    async fn test_delete_task_checks_board_scope() {
        let state = setup().await;
        let mine = create_board(&state, "Mine".to_string()).await.unwrap();
        let other = create_board(&state, "Other".to_string()).await.unwrap();
        let list = create_task_list(&state, mine.id, "L".to_string()).await.unwrap();
        let task = create_task(&state, list.id, mine.id, "A".to_string()).await.unwrap();

        let err = delete_task(&state, other.id, list.id, task.id).await.unwrap_err();
        assert!(err.is_not_found());

        let snapshot = fetch_board_snapshot(&state, mine.id).await.unwrap();
        assert_eq!(snapshot.task_count(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_is_ordered_by_position() {
        let state = setup().await;
        let board = create_board(&state, "B".to_string()).await.unwrap();
        let first = create_task_list(&state, board.id, "First".to_string()).await.unwrap();
        let second = create_task_list(&state, board.id, "Second".to_string()).await.unwrap();
        for name in ["a", "b", "c"] {
            create_task(&state, second.id, board.id, name.to_string()).await.unwrap();
        }

        crate::commands::swap_list_positions(&state, board.id, 0, 1).await.unwrap();
        swap_task_positions(&state, second.id, 0, 2).await.unwrap();

        let snapshot = fetch_board_snapshot(&state, board.id).await.unwrap();
        let list_ids: Vec<u32> = snapshot.lists.iter().map(|l| l.id).collect();
        assert_eq!(list_ids, vec![second.id, first.id]);
        let names: Vec<&str> = snapshot.lists[0].tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_toggle_completed() {
        let state = setup().await;
        let board = create_board(&state, "B".to_string()).await.unwrap();
        let list = create_task_list(&state, board.id, "L".to_string()).await.unwrap();
        let task = create_task(&state, list.id, board.id, "A".to_string()).await.unwrap();

        let done = set_task_completed(&state, board.id, list.id, task.id, true).await.unwrap();
        assert!(done.completed);
    }

    #[tokio::test]
    async fn test_snapshot_of_missing_board() {
        let state = setup().await;
        assert!(fetch_board_snapshot(&state, 9).await.unwrap_err().is_not_found());
    }
}
