//! TaskList Repository - Core CRUD Operations
//!
//! Every removal compacts the positions of the remaining lists of the board
//! inside the same transaction.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{DomainError, DomainResult, TaskList};
use crate::repository::db::{not_initialized, now_millis, SharedConnection};
use crate::repository::traits::Repository;

use super::task_list_positioning::next_list_position;

/// SQLite implementation of TaskList repository
pub struct TaskListRepository {
    pub(super) conn: SharedConnection,
}

impl TaskListRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Lists of a board ordered by position (tasks not loaded)
    pub async fn list_by_board(&self, board_id: u32) -> DomainResult<Vec<TaskList>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn.prepare(
            "SELECT id, board_id, name, position FROM task_lists WHERE board_id = ?1 ORDER BY position, id",
        )?;
        let lists = stmt
            .query_map(params![board_id], row_to_task_list)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lists)
    }

    /// Find a list, requiring it to belong to `board_id`
    pub async fn find_in_board(&self, board_id: u32, list_id: u32) -> DomainResult<TaskList> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        find_scoped(conn, board_id, list_id)
    }

    /// Delete a list (and its tasks) from a board, closing the position gap
    pub async fn delete_from_board(&self, board_id: u32, list_id: u32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;

        let list = find_scoped(&tx, board_id, list_id)?;
        remove_with_compaction(&tx, &list)?;

        tx.commit()?;
        log::debug!("Deleted list {} from board {} at position {}", list_id, board_id, list.position);
        Ok(())
    }
}

pub(super) fn row_to_task_list(row: &Row<'_>) -> rusqlite::Result<TaskList> {
    Ok(TaskList::new(row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn find_scoped(conn: &Connection, board_id: u32, list_id: u32) -> DomainResult<TaskList> {
    conn.query_row(
        "SELECT id, board_id, name, position FROM task_lists WHERE id = ?1 AND board_id = ?2",
        params![list_id, board_id],
        row_to_task_list,
    )
    .optional()?
    .ok_or_else(|| DomainError::NotFound(format!("Task list {} not found in board {}", list_id, board_id)))
}

fn remove_with_compaction(conn: &Connection, list: &TaskList) -> DomainResult<()> {
    conn.execute("DELETE FROM tasks WHERE list_id = ?1", params![list.id])?;
    conn.execute("DELETE FROM task_lists WHERE id = ?1", params![list.id])?;
    conn.execute(
        "UPDATE task_lists SET position = position - 1, updated_at = ?1 WHERE board_id = ?2 AND position > ?3",
        params![now_millis(), list.board_id, list.position],
    )?;
    Ok(())
}

#[async_trait]
impl Repository<TaskList> for TaskListRepository {
    /// Appends the list at the end of its board; the given position is ignored
    async fn create(&self, entity: &TaskList) -> DomainResult<TaskList> {
        if entity.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("Task list name must not be empty".into()));
        }

        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let board_exists = conn
            .query_row("SELECT 1 FROM boards WHERE id = ?1", params![entity.board_id], |_| Ok(()))
            .optional()?
            .is_some();
        if !board_exists {
            return Err(DomainError::NotFound(format!("Board {} not found", entity.board_id)));
        }

        let position = next_list_position(conn, entity.board_id)?;

        conn.execute(
            "INSERT INTO task_lists (board_id, name, position, updated_at) VALUES (?1, ?2, ?3, ?4)",
            params![entity.board_id, entity.name, position, now_millis()],
        )?;

        let id = conn.last_insert_rowid() as u32;
        Ok(TaskList::new(id, entity.board_id, entity.name.clone(), position))
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<TaskList>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let list = conn
            .query_row(
                "SELECT id, board_id, name, position FROM task_lists WHERE id = ?1",
                params![id],
                row_to_task_list,
            )
            .optional()?;
        Ok(list)
    }

    async fn list(&self) -> DomainResult<Vec<TaskList>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn.prepare(
            "SELECT id, board_id, name, position FROM task_lists ORDER BY board_id, position",
        )?;
        let lists = stmt
            .query_map([], row_to_task_list)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lists)
    }

    /// Renames only. Positions change through `TaskListPositioningOperations`.
    async fn update(&self, entity: &TaskList) -> DomainResult<TaskList> {
        if entity.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("Task list name must not be empty".into()));
        }

        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn.execute(
            "UPDATE task_lists SET name = ?1, updated_at = ?2 WHERE id = ?3 AND board_id = ?4",
            params![entity.name, now_millis(), entity.id, entity.board_id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Task list {} not found", entity.id)));
        }

        find_scoped(conn, entity.board_id, entity.id)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;

        let list = tx
            .query_row(
                "SELECT id, board_id, name, position FROM task_lists WHERE id = ?1",
                params![id],
                row_to_task_list,
            )
            .optional()?
            .ok_or_else(|| DomainError::NotFound(format!("Task list {} not found", id)))?;
        remove_with_compaction(&tx, &list)?;

        tx.commit()?;
        Ok(())
    }
}
