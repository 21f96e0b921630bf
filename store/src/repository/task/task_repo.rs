//! Task Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Task CRUD operations.
//! Position changes live in task_positioning.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{DomainError, DomainResult, Task};
use crate::repository::db::{not_initialized, now_millis, SharedConnection};
use crate::repository::traits::Repository;

use super::task_positioning::next_task_position;

const TASK_COLUMNS: &str = "id, list_id, name, completed, position";

/// SQLite implementation of Task repository
pub struct TaskRepository {
    pub(super) conn: SharedConnection,
}

impl TaskRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Tasks of a list ordered by position
    pub async fn list_by_list(&self, list_id: u32) -> DomainResult<Vec<Task>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM tasks WHERE list_id = ?1 ORDER BY position, id",
            TASK_COLUMNS
        ))?;
        let tasks = stmt
            .query_map(params![list_id], row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Find a task, requiring it to belong to `list_id`
    pub async fn find_in_list(&self, list_id: u32, task_id: u32) -> DomainResult<Task> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        find_scoped(conn, list_id, task_id)
    }

    /// Delete a task from a list, closing the position gap
    pub async fn delete_from_list(&self, list_id: u32, task_id: u32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;

        let task = find_scoped(&tx, list_id, task_id)?;
        remove_with_compaction(&tx, &task)?;

        tx.commit()?;
        log::debug!("Deleted task {} from list {} at position {}", task_id, list_id, task.position);
        Ok(())
    }

    /// Set the completion flag of a task
    pub async fn set_completed(&self, list_id: u32, task_id: u32, completed: bool) -> DomainResult<Task> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn.execute(
            "UPDATE tasks SET completed = ?1, updated_at = ?2 WHERE id = ?3 AND list_id = ?4",
            params![completed, now_millis(), task_id, list_id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Task {} not found in list {}", task_id, list_id)));
        }
        find_scoped(conn, list_id, task_id)
    }
}

pub(super) fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        list_id: row.get(1)?,
        name: row.get(2)?,
        completed: row.get::<_, i32>(3)? != 0,
        position: row.get(4)?,
    })
}

pub(super) fn find_scoped(conn: &Connection, list_id: u32, task_id: u32) -> DomainResult<Task> {
    conn.query_row(
        &format!("SELECT {} FROM tasks WHERE id = ?1 AND list_id = ?2", TASK_COLUMNS),
        params![task_id, list_id],
        row_to_task,
    )
    .optional()?
    .ok_or_else(|| DomainError::NotFound(format!("Task {} not found in list {}", task_id, list_id)))
}

fn remove_with_compaction(conn: &Connection, task: &Task) -> DomainResult<()> {
    conn.execute("DELETE FROM tasks WHERE id = ?1", params![task.id])?;
    conn.execute(
        "UPDATE tasks SET position = position - 1, updated_at = ?1 WHERE list_id = ?2 AND position > ?3",
        params![now_millis(), task.list_id, task.position],
    )?;
    Ok(())
}

#[async_trait]
impl Repository<Task> for TaskRepository {
    /// Appends the task at the end of its list; the given position is ignored
    async fn create(&self, entity: &Task) -> DomainResult<Task> {
        if entity.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("Task name must not be empty".into()));
        }

        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let list_exists = conn
            .query_row("SELECT 1 FROM task_lists WHERE id = ?1", params![entity.list_id], |_| Ok(()))
            .optional()?
            .is_some();
        if !list_exists {
            return Err(DomainError::NotFound(format!("Task list {} not found", entity.list_id)));
        }

        let position = next_task_position(conn, entity.list_id)?;

        conn.execute(
            "INSERT INTO tasks (list_id, name, completed, position, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![entity.list_id, entity.name, entity.completed, position, now_millis()],
        )?;

        let mut task = entity.clone();
        task.id = conn.last_insert_rowid() as u32;
        task.position = position;
        Ok(task)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Task>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let task = conn
            .query_row(
                &format!("SELECT {} FROM tasks WHERE id = ?1", TASK_COLUMNS),
                params![id],
                row_to_task,
            )
            .optional()?;
        Ok(task)
    }

    async fn list(&self) -> DomainResult<Vec<Task>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM tasks ORDER BY list_id, position",
            TASK_COLUMNS
        ))?;
        let tasks = stmt
            .query_map([], row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Updates name and completion. Positions change through `TaskPositioningOperations`.
    async fn update(&self, entity: &Task) -> DomainResult<Task> {
        if entity.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("Task name must not be empty".into()));
        }

        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn.execute(
            "UPDATE tasks SET name = ?1, completed = ?2, updated_at = ?3 WHERE id = ?4 AND list_id = ?5",
            params![entity.name, entity.completed, now_millis(), entity.id, entity.list_id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Task {} not found", entity.id)));
        }

        find_scoped(conn, entity.list_id, entity.id)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;

        let task = tx
            .query_row(
                &format!("SELECT {} FROM tasks WHERE id = ?1", TASK_COLUMNS),
                params![id],
                row_to_task,
            )
            .optional()?
            .ok_or_else(|| DomainError::NotFound(format!("Task {} not found", id)))?;
        remove_with_compaction(&tx, &task)?;

        tx.commit()?;
        Ok(())
    }
}
