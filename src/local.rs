//! Local Store Adapter
//!
//! [`BoardApi`] backed by an in-process `taskboard_store::AppState`.
//! Values cross the boundary the same way they would over the wire,
//! serialized on one side and deserialized on the other.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use taskboard_store::commands;
use taskboard_store::domain::{self as store, DomainError};
use taskboard_store::AppState;

use crate::api::{ApiError, ApiResult, BoardApi};
use crate::models::{BoardSnapshot, Task, TaskList};

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(msg) => ApiError::NotFound(msg),
            DomainError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            DomainError::Conflict(msg) => ApiError::Conflict(msg),
            DomainError::Internal(msg) => ApiError::Transport(msg),
        }
    }
}

fn marshal<T: Serialize, U: DeserializeOwned>(value: T) -> ApiResult<U> {
    serde_json::to_value(value)
        .and_then(serde_json::from_value)
        .map_err(|e| ApiError::Transport(format!("Failed to convert payload: {}", e)))
}

#[derive(Clone)]
pub struct LocalBoardApi {
    state: Arc<AppState>,
}

impl LocalBoardApi {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl BoardApi for LocalBoardApi {
    async fn fetch_board_snapshot(&self, board_id: u32) -> ApiResult<BoardSnapshot> {
        let snapshot = commands::fetch_board_snapshot(&self.state, board_id).await?;
        marshal(snapshot)
    }

    async fn create_task_list(&self, board_id: u32, name: String) -> ApiResult<TaskList> {
        let list = commands::create_task_list(&self.state, board_id, name).await?;
        marshal(list)
    }

    async fn rename_task_list(
        &self,
        board_id: u32,
        list_id: u32,
        name: String,
    ) -> ApiResult<TaskList> {
        let list = commands::rename_task_list(&self.state, board_id, list_id, name).await?;
        marshal(list)
    }

    async fn delete_task_list(&self, board_id: u32, list_id: u32) -> ApiResult<()> {
        Ok(commands::delete_task_list(&self.state, board_id, list_id).await?)
    }

    async fn swap_list_positions(&self, board_id: u32, a: i32, b: i32) -> ApiResult<()> {
        Ok(commands::swap_list_positions(&self.state, board_id, a, b).await?)
    }

    async fn create_task(&self, list_id: u32, board_id: u32, name: String) -> ApiResult<Task> {
        let task = commands::create_task(&self.state, list_id, board_id, name).await?;
        marshal(task)
    }

    async fn rename_task(
        &self,
        board_id: u32,
        list_id: u32,
        task_id: u32,
        name: String,
    ) -> ApiResult<Task> {
        let task = commands::rename_task(&self.state, board_id, list_id, task_id, name).await?;
        marshal(task)
    }

    async fn set_task_completed(
        &self,
        board_id: u32,
        list_id: u32,
        task_id: u32,
        completed: bool,
    ) -> ApiResult<Task> {
        let task =
            commands::set_task_completed(&self.state, board_id, list_id, task_id, completed)
                .await?;
        marshal(task)
    }

    async fn delete_task(&self, board_id: u32, list_id: u32, task_id: u32) -> ApiResult<()> {
        Ok(commands::delete_task(&self.state, board_id, list_id, task_id).await?)
    }

    async fn insert_task_at(
        &self,
        board_id: u32,
        list_id: u32,
        index: i32,
        payload: Task,
    ) -> ApiResult<Task> {
        let payload: store::Task = marshal(payload)?;
        let task = commands::insert_task_at(&self.state, board_id, list_id, index, payload).await?;
        marshal(task)
    }

    async fn swap_task_positions(&self, list_id: u32, a: i32, b: i32) -> ApiResult<()> {
        Ok(commands::swap_task_positions(&self.state, list_id, a, b).await?)
    }
}
