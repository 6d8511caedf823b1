//! UI layer for desktop GUI: app shell and painting of the rendered view tree.

pub mod app;

pub use app::{PartyPlannerApp, StartupConfig};
