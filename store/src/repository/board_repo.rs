//! Board Repository
//!
//! SQLite-backed CRUD for boards. Deleting a board removes its lists and tasks.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};

use crate::domain::{Board, DomainError, DomainResult};
use super::db::{not_initialized, SharedConnection};
use super::traits::Repository;

pub struct BoardRepository {
    conn: SharedConnection,
}

impl BoardRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

fn row_to_board(row: &Row<'_>) -> rusqlite::Result<Board> {
    Ok(Board {
        id: row.get(0)?,
        title: row.get(1)?,
        created_at: row.get(2)?,
    })
}

#[async_trait]
impl Repository<Board> for BoardRepository {
    async fn create(&self, entity: &Board) -> DomainResult<Board> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        conn.execute(
            "INSERT INTO boards (title, created_at) VALUES (?1, ?2)",
            params![entity.title, entity.created_at],
        )?;

        let mut board = entity.clone();
        board.id = conn.last_insert_rowid() as u32;
        Ok(board)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Board>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let board = conn
            .query_row(
                "SELECT id, title, created_at FROM boards WHERE id = ?1",
                params![id],
                row_to_board,
            )
            .optional()?;
        Ok(board)
    }

    async fn list(&self) -> DomainResult<Vec<Board>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn.prepare("SELECT id, title, created_at FROM boards ORDER BY id")?;
        let boards = stmt
            .query_map([], row_to_board)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(boards)
    }

    async fn update(&self, entity: &Board) -> DomainResult<Board> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn.execute(
            "UPDATE boards SET title = ?1 WHERE id = ?2",
            params![entity.title, entity.id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Board {} not found", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;

        // Manual cascade: tasks, then lists, then the board itself
        tx.execute(
            "DELETE FROM tasks WHERE list_id IN (SELECT id FROM task_lists WHERE board_id = ?1)",
            params![id],
        )?;
        tx.execute("DELETE FROM task_lists WHERE board_id = ?1", params![id])?;
        let removed = tx.execute("DELETE FROM boards WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(DomainError::NotFound(format!("Board {} not found", id)));
        }

        tx.commit()?;
        Ok(())
    }
}
