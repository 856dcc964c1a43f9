//! Configuration module
//!
//! This module contains components for loading and validating configuration.

mod loader;
mod model;

pub use loader::{expand_path, load_config, parse_config};
pub use model::{CollisionPolicy, Config, PassToggles, RewriteOptions};
