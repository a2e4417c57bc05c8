//! Core domain types
//!
//! This module contains the domain structures shared across HWProbe crates.
//! These types represent the fundamental entities of a diagnostic run and
//! are used by both the client backends and the orchestration engine.

pub mod target;
pub mod task;

pub use target::Xname;
pub use task::{JobId, TaskState};
