//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO storage dependencies (only serde and chrono).

mod entity;
mod board;
mod task_list;
mod task;

pub use entity::{Entity, DomainError, DomainResult};
pub use board::{Board, BoardSnapshot};
pub use task_list::TaskList;
pub use task::Task;
