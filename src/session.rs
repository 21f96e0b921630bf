//! Session Decorator
//!
//! Wraps a [`BoardApi`] so that an `Unauthorized` answer triggers one
//! credential refresh and one retry. A failed refresh ends the session.

use async_trait::async_trait;

use crate::api::{ApiError, ApiFuture, ApiResult, BoardApi};
use crate::models::{BoardSnapshot, Task, TaskList};

#[async_trait]
pub trait SessionRefresher: Send + Sync {
    /// Refresh credentials. Returns false when the session cannot be renewed.
    async fn refresh(&self) -> bool;

    /// Called once the session is unrecoverable (navigate to login).
    fn login_required(&self);
}

pub struct SessionApi<A, R> {
    inner: A,
    refresher: R,
}

impl<A: BoardApi, R: SessionRefresher> SessionApi<A, R> {
    pub fn new(inner: A, refresher: R) -> Self {
        Self { inner, refresher }
    }

    async fn with_session<'a, T, F>(&'a self, call: F) -> ApiResult<T>
    where
        T: Send,
        F: Fn(&'a A) -> ApiFuture<'a, T> + Send + Sync + 'a,
    {
        match call(&self.inner).await {
            Err(ApiError::Unauthorized) => {
                log::info!("Request unauthorized, refreshing session");
                if self.refresher.refresh().await {
                    call(&self.inner).await
                } else {
                    log::warn!("Session refresh failed, login required");
                    self.refresher.login_required();
                    Err(ApiError::LoginRequired)
                }
            }
            other => other,
        }
    }
}

#[async_trait]
impl<A: BoardApi, R: SessionRefresher> BoardApi for SessionApi<A, R> {
    async fn fetch_board_snapshot(&self, board_id: u32) -> ApiResult<BoardSnapshot> {
        self.with_session(|api| api.fetch_board_snapshot(board_id))
            .await
    }

    async fn create_task_list(&self, board_id: u32, name: String) -> ApiResult<TaskList> {
        self.with_session(|api| api.create_task_list(board_id, name.clone()))
            .await
    }

    async fn rename_task_list(
        &self,
        board_id: u32,
        list_id: u32,
        name: String,
    ) -> ApiResult<TaskList> {
        self.with_session(|api| api.rename_task_list(board_id, list_id, name.clone()))
            .await
    }

    async fn delete_task_list(&self, board_id: u32, list_id: u32) -> ApiResult<()> {
        self.with_session(|api| api.delete_task_list(board_id, list_id))
            .await
    }

    async fn swap_list_positions(&self, board_id: u32, a: i32, b: i32) -> ApiResult<()> {
        self.with_session(|api| api.swap_list_positions(board_id, a, b))
            .await
    }

    async fn create_task(&self, list_id: u32, board_id: u32, name: String) -> ApiResult<Task> {
        self.with_session(|api| api.create_task(list_id, board_id, name.clone()))
            .await
    }

    async fn rename_task(
        &self,
        board_id: u32,
        list_id: u32,
        task_id: u32,
        name: String,
    ) -> ApiResult<Task> {
        self.with_session(|api| api.rename_task(board_id, list_id, task_id, name.clone()))
            .await
    }

    async fn set_task_completed(
        &self,
        board_id: u32,
        list_id: u32,
        task_id: u32,
        completed: bool,
    ) -> ApiResult<Task> {
        self.with_session(|api| api.set_task_completed(board_id, list_id, task_id, completed))
            .await
    }

    async fn delete_task(&self, board_id: u32, list_id: u32, task_id: u32) -> ApiResult<()> {
        self.with_session(|api| api.delete_task(board_id, list_id, task_id))
            .await
    }

    async fn insert_task_at(
        &self,
        board_id: u32,
        list_id: u32,
        index: i32,
        payload: Task,
    ) -> ApiResult<Task> {
        self.with_session(|api| api.insert_task_at(board_id, list_id, index, payload.clone()))
            .await
    }

    async fn swap_task_positions(&self, list_id: u32, a: i32, b: i32) -> ApiResult<()> {
        self.with_session(|api| api.swap_task_positions(list_id, a, b))
            .await
    }
}
