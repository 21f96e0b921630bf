//! Board Commands
//!
//! Board CRUD and the full snapshot used by clients to reconcile.

use crate::domain::{Board, BoardSnapshot, DomainError, DomainResult};
use crate::repository::Repository;
use crate::AppState;

pub async fn create_board(state: &AppState, title: String) -> DomainResult<Board> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidInput("Board title must not be empty".into()));
    }
    state.board_repo.create(&Board::new(0, title)).await
}

pub async fn list_boards(state: &AppState) -> DomainResult<Vec<Board>> {
    state.board_repo.list().await
}

pub async fn rename_board(state: &AppState, board_id: u32, title: String) -> DomainResult<Board> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidInput("Board title must not be empty".into()));
    }
    let mut board = require_board(state, board_id).await?;
    board.title = title;
    state.board_repo.update(&board).await
}

/// Delete a board with all of its lists and tasks
pub async fn delete_board(state: &AppState, board_id: u32) -> DomainResult<()> {
    state.board_repo.delete(board_id).await?;
    log::info!("Deleted board {}", board_id);
    Ok(())
}

/// Lists ordered by position, each carrying its tasks ordered by position
pub async fn fetch_board_snapshot(state: &AppState, board_id: u32) -> DomainResult<BoardSnapshot> {
    let board = require_board(state, board_id).await?;

    let mut lists = state.list_repo.list_by_board(board_id).await?;
    for list in lists.iter_mut() {
        list.tasks = state.task_repo.list_by_list(list.id).await?;
    }

    let snapshot = BoardSnapshot { board, lists };
    log::debug!(
        "Snapshot of board {}: {} lists, {} tasks",
        board_id,
        snapshot.lists.len(),
        snapshot.task_count()
    );
    Ok(snapshot)
}

pub(crate) async fn require_board(state: &AppState, board_id: u32) -> DomainResult<Board> {
    state
        .board_repo
        .find_by_id(board_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Board {} not found", board_id)))
}
