//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Sweep: Removes expired cache entries at a configured interval (opt-in)

mod cleanup;

pub use cleanup::{spawn_cleanup_task, spawn_cleanup_task_every};
