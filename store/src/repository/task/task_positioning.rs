//! Task Positioning Operations
//!
//! Position management for tasks within their list.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{DomainError, DomainResult, Task};
use crate::repository::db::{not_initialized, now_millis};

/// Position an appended task receives; callers hold the connection lock
pub(super) fn next_task_position(conn: &Connection, list_id: u32) -> rusqlite::Result<i32> {
    conn.query_row(
        "SELECT COALESCE(MAX(position), -1) + 1 FROM tasks WHERE list_id = ?1",
        params![list_id],
        |row| row.get(0),
    )
}

/// Trait for task positioning operations
#[async_trait]
pub trait TaskPositioningOperations {
    /// Get next position for a list (used in create)
    async fn get_next_position(&self, list_id: u32) -> DomainResult<i32>;

    /// Exchange the tasks currently at positions `a` and `b` of a list.
    /// Fails with NotFound, changing nothing, if either position is empty.
    async fn swap_positions(&self, list_id: u32, a: i32, b: i32) -> DomainResult<()>;

    /// Insert `payload` into a list at `index` (clamped to the list length),
    /// shifting the tasks at or after it down by one.
    ///
    /// A non-zero payload id is kept so a task moved between lists keeps its
    /// identity; it must not be in use.
    async fn insert_at(&self, list_id: u32, index: i32, payload: &Task) -> DomainResult<Task>;

    /// Reindex tasks of a list to be sequential (0, 1, 2, ...)
    async fn reindex_tasks(&self, list_id: u32) -> DomainResult<()>;
}

#[async_trait]
impl TaskPositioningOperations for super::task_repo::TaskRepository {
    async fn get_next_position(&self, list_id: u32) -> DomainResult<i32> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        Ok(next_task_position(conn, list_id)?)
    }

    async fn swap_positions(&self, list_id: u32, a: i32, b: i32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;

        let mut ids = [0u32; 2];
        for (slot, position) in ids.iter_mut().zip([a, b]) {
            *slot = tx
                .query_row(
                    "SELECT id FROM tasks WHERE list_id = ?1 AND position = ?2",
                    params![list_id, position],
                    |row| row.get(0),
                )
                .optional()?
                .ok_or_else(|| {
                    DomainError::NotFound(format!("No task at position {} in list {}", position, list_id))
                })?;
        }

        if a != b {
            let now = now_millis();
            tx.execute(
                "UPDATE tasks SET position = ?1, updated_at = ?2 WHERE id = ?3",
                params![b, now, ids[0]],
            )?;
            tx.execute(
                "UPDATE tasks SET position = ?1, updated_at = ?2 WHERE id = ?3",
                params![a, now, ids[1]],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    async fn insert_at(&self, list_id: u32, index: i32, payload: &Task) -> DomainResult<Task> {
        if index < 0 {
            return Err(DomainError::InvalidInput(format!("Negative insert index {}", index)));
        }
        if payload.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("Task name must not be empty".into()));
        }

        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;

        let list_exists = tx
            .query_row("SELECT 1 FROM task_lists WHERE id = ?1", params![list_id], |_| Ok(()))
            .optional()?
            .is_some();
        if !list_exists {
            return Err(DomainError::NotFound(format!("Task list {} not found", list_id)));
        }

        let len: i32 = tx.query_row(
            "SELECT COUNT(*) FROM tasks WHERE list_id = ?1",
            params![list_id],
            |row| row.get(0),
        )?;
        let position = index.min(len);
        let now = now_millis();

        // Shift existing tasks at target position down
        tx.execute(
            "UPDATE tasks SET position = position + 1, updated_at = ?1 WHERE list_id = ?2 AND position >= ?3",
            params![now, list_id, position],
        )?;

        if payload.id != 0 {
            let taken = tx
                .query_row("SELECT 1 FROM tasks WHERE id = ?1", params![payload.id], |_| Ok(()))
                .optional()?
                .is_some();
            if taken {
                return Err(DomainError::Conflict(format!("Task id {} is already in use", payload.id)));
            }
            tx.execute(
                "INSERT INTO tasks (id, list_id, name, completed, position, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![payload.id, list_id, payload.name, payload.completed, position, now],
            )?;
        } else {
            tx.execute(
                "INSERT INTO tasks (list_id, name, completed, position, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![list_id, payload.name, payload.completed, position, now],
            )?;
        }
        let id = tx.last_insert_rowid() as u32;

        tx.commit()?;

        Ok(Task {
            id,
            list_id,
            name: payload.name.clone(),
            completed: payload.completed,
            position,
        })
    }

    async fn reindex_tasks(&self, list_id: u32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;

        // Get all tasks of this list ordered by current position
        let ids = {
            let mut stmt = tx.prepare("SELECT id FROM tasks WHERE list_id = ?1 ORDER BY position, id")?;
            let ids = stmt
                .query_map(params![list_id], |row| row.get::<_, u32>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            ids
        };

        let now = now_millis();
        for (new_pos, id) in ids.iter().enumerate() {
            tx.execute(
                "UPDATE tasks SET position = ?1, updated_at = ?2 WHERE id = ?3",
                params![new_pos as i32, now, *id],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}
