//! Task List Commands
//!
//! Create, rename, delete and swap lists inside a board.

use crate::domain::{DomainResult, TaskList};
use crate::repository::{Repository, TaskListPositioningOperations};
use crate::AppState;

/// Append a new list at the end of the board
pub async fn create_task_list(state: &AppState, board_id: u32, name: String) -> DomainResult<TaskList> {
    let list = state.list_repo.create(&TaskList::new(0, board_id, name, 0)).await?;
    log::debug!("Created list {} in board {} at position {}", list.id, board_id, list.position);
    Ok(list)
}

pub async fn rename_task_list(
    state: &AppState,
    board_id: u32,
    list_id: u32,
    name: String,
) -> DomainResult<TaskList> {
    let mut list = state.list_repo.find_in_board(board_id, list_id).await?;
    list.name = name;
    state.list_repo.update(&list).await
}

/// Delete a list and its tasks; later lists move up one position
pub async fn delete_task_list(state: &AppState, board_id: u32, list_id: u32) -> DomainResult<()> {
    state.list_repo.delete_from_board(board_id, list_id).await
}

/// Exchange the lists at two absolute positions of a board
pub async fn swap_list_positions(state: &AppState, board_id: u32, a: i32, b: i32) -> DomainResult<()> {
    let result = state.list_repo.swap_positions(board_id, a, b).await;
    if let Err(e) = &result {
        log::warn!("Swap of list positions {} and {} in board {} rejected: {}", a, b, board_id, e);
    }
    result
}
