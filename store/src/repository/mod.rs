//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod board_repo;
mod task_list;
mod task;


pub use traits::Repository;
pub use db::{init_db, DbState, SharedConnection};
pub use board_repo::BoardRepository;
pub use task_list::{TaskListRepository, TaskListPositioningOperations};
pub use task::{TaskRepository, TaskPositioningOperations};
