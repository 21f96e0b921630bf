//! TaskList Repository Module
//!
//! - task_list_repo: Core CRUD operations and board-scoped queries
//! - task_list_positioning: Position management (next position, swap)

mod task_list_repo;
mod task_list_positioning;

pub use task_list_repo::TaskListRepository;

// Re-export the operation trait so it can be used by importing TaskListRepository
pub use task_list_positioning::TaskListPositioningOperations;
