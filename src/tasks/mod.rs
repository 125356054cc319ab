//! Background Tasks Module
//!
//! # Tasks
//! - Cache sweep: drops expired responses at a configured interval (opt-in)

mod cleanup;

pub use cleanup::spawn_cleanup_task;
