//! Pipeline module
//!
//! This module contains the orchestrator that runs the passes in order.

mod context;
mod engine;

pub use context::{RunContext, RunReport};
pub use engine::run;
