//! Post-build processing of a static site output directory
//!
//! Three passes run over the finished tree, in this order:
//! pretty URLs, image extension normalization and image reference
//! rewriting. See [`pipeline::run`].

pub mod cli;
pub mod config;
mod configuration;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod passes;
pub mod pipeline;
pub mod walker;

pub use configuration::{configuration_from_matches, perform_processing_based_on_configuration};

pub mod prelude {
    pub use crate::cli::{get_log_file, get_matches, get_verbosity};
    pub use crate::config::{CollisionPolicy, Config};
    pub use crate::constants::{COMPLETE_MESSAGE, ERROR_PREFIX};
    pub use crate::errors::{Error, ErrorKind, Result};
    pub use crate::logging::{LogLevel, init_logger, mutation_line};
    pub use crate::perform_processing_based_on_configuration;
    pub use crate::pipeline::{RunReport, run};
}
