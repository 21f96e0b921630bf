//! Task Repository Module
//!
//! - task_repo: Core CRUD operations and list-scoped queries
//! - task_positioning: Position management (swap, insert-at, reindex)

mod task_repo;
mod task_positioning;

pub use task_repo::TaskRepository;

// Re-export the operation trait so it can be used by importing TaskRepository
pub use task_positioning::TaskPositioningOperations;
