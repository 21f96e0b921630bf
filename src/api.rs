//! Board API
//!
//! The seam between the board coordinator and whatever persists the board.
//! Every durable operation the coordinator issues goes through [`BoardApi`].

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

use crate::models::{BoardSnapshot, Task, TaskList};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("login required")]
    LoginRequired,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("transport error: {0}")]
    Transport(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Boxed future returned by [`BoardApi`] methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = ApiResult<T>> + Send + 'a>>;

#[async_trait]
pub trait BoardApi: Send + Sync {
    async fn fetch_board_snapshot(&self, board_id: u32) -> ApiResult<BoardSnapshot>;

    async fn create_task_list(&self, board_id: u32, name: String) -> ApiResult<TaskList>;
    async fn rename_task_list(&self, board_id: u32, list_id: u32, name: String)
        -> ApiResult<TaskList>;
    async fn delete_task_list(&self, board_id: u32, list_id: u32) -> ApiResult<()>;
    async fn swap_list_positions(&self, board_id: u32, a: i32, b: i32) -> ApiResult<()>;

    async fn create_task(&self, list_id: u32, board_id: u32, name: String) -> ApiResult<Task>;
    async fn rename_task(
        &self,
        board_id: u32,
        list_id: u32,
        task_id: u32,
        name: String,
    ) -> ApiResult<Task>;
    async fn set_task_completed(
        &self,
        board_id: u32,
        list_id: u32,
        task_id: u32,
        completed: bool,
    ) -> ApiResult<Task>;
    async fn delete_task(&self, board_id: u32, list_id: u32, task_id: u32) -> ApiResult<()>;
    /// Splice `payload` into a list at `index`, keeping its id.
    async fn insert_task_at(
        &self,
        board_id: u32,
        list_id: u32,
        index: i32,
        payload: Task,
    ) -> ApiResult<Task>;
    async fn swap_task_positions(&self, list_id: u32, a: i32, b: i32) -> ApiResult<()>;
}
