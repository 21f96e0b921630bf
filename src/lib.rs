//! Task Board Client Core
//!
//! Modules:
//! - models: serde structs matching the store entities
//! - position / reorder / transfer: dense-position engines
//! - board: optimistic coordinator with undo delete
//! - api / session / local: the durable-write seam and its implementations

pub mod api;
pub mod board;
pub mod config;
pub mod local;
pub mod models;
pub mod position;
pub mod reorder;
pub mod session;
pub mod transfer;
pub mod undo;

pub use api::{ApiError, ApiResult, BoardApi};
pub use board::{BoardView, GestureEffect};
pub use local::LocalBoardApi;
pub use session::{SessionApi, SessionRefresher};
