//! Commands Layer
//!
//! Handlers that bridge clients to the repositories. Each one validates
//! board/list scope before touching positions.

mod board_cmd;
mod task_list_cmd;
mod task_cmd;

pub use board_cmd::*;
pub use task_list_cmd::*;
pub use task_cmd::*;
