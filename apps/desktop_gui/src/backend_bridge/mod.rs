//! Queue and worker that carry UI commands to the async planner.

pub mod commands;
pub mod runtime;
