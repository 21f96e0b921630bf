//! TaskList Positioning Operations
//!
//! Position management for lists within their board.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{DomainError, DomainResult};
use crate::repository::db::{not_initialized, now_millis};

/// Position an appended list receives; callers hold the connection lock
pub(super) fn next_list_position(conn: &Connection, board_id: u32) -> rusqlite::Result<i32> {
    conn.query_row(
        "SELECT COALESCE(MAX(position), -1) + 1 FROM task_lists WHERE board_id = ?1",
        params![board_id],
        |row| row.get(0),
    )
}

/// Trait for task list positioning operations
#[async_trait]
pub trait TaskListPositioningOperations {
    /// Get next position for a board (used in create)
    async fn get_next_position(&self, board_id: u32) -> DomainResult<i32>;

    /// Exchange the lists currently at positions `a` and `b` of a board.
    /// Fails with NotFound, changing nothing, if either position is empty.
    async fn swap_positions(&self, board_id: u32, a: i32, b: i32) -> DomainResult<()>;
}

#[async_trait]
impl TaskListPositioningOperations for super::task_list_repo::TaskListRepository {
    async fn get_next_position(&self, board_id: u32) -> DomainResult<i32> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        Ok(next_list_position(conn, board_id)?)
    }

    async fn swap_positions(&self, board_id: u32, a: i32, b: i32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;

        let mut ids = [0u32; 2];
        for (slot, position) in ids.iter_mut().zip([a, b]) {
            *slot = tx
                .query_row(
                    "SELECT id FROM task_lists WHERE board_id = ?1 AND position = ?2",
                    params![board_id, position],
                    |row| row.get(0),
                )
                .optional()?
                .ok_or_else(|| {
                    DomainError::NotFound(format!("No task list at position {} in board {}", position, board_id))
                })?;
        }

        if a != b {
            let now = now_millis();
            tx.execute(
                "UPDATE task_lists SET position = ?1, updated_at = ?2 WHERE id = ?3",
                params![b, now, ids[0]],
            )?;
            tx.execute(
                "UPDATE task_lists SET position = ?1, updated_at = ?2 WHERE id = ?3",
                params![a, now, ids[1]],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}
