/// Constants used throughout the application
///
/// This module centralises all constants used in the application to make
/// them easier to manage and update.

/// Output directory processed when neither the CLI nor the config names one
pub const DEFAULT_ROOT: &str = "dist";

/// Suffix identifying HTML pages
pub const DEFAULT_HTML_EXTENSION: &str = ".html";

/// Page name that is never moved into its own directory
pub const DEFAULT_INDEX_NAME: &str = "index.html";

/// Image extensions an optimizer may leave in front of the target extension
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Extension produced by the image optimizer
pub const DEFAULT_TARGET_EXTENSION: &str = "webp";

/// Path segment an image reference has to contain to be rewritten
pub const DEFAULT_ASSET_PREFIX: &str = "assets/img/";

/// Default log file, empty means no file logging
pub const LOG_FILE_DEFAULT: &str = "";

/// Help text for the root positional argument
pub const ROOT_HELP: &str = "Output directory to process (overrides the configuration)";

/// Help text for the config command-line option
pub const CONFIG_HELP: &str = "Read from a specific config file";

/// Help text for the dry-run command-line option
pub const DRY_RUN_HELP: &str = "Log planned changes without touching any files";

/// Help text for the verbose command-line option
pub const VERBOSE_HELP: &str = "Increase verbosity level (can be used multiple times)";

/// Help text for the quiet command-line option
pub const QUIET_HELP: &str = "Only log errors";

/// Help text for the log file command-line option
pub const LOG_FILE_HELP: &str = "Also write log lines to this file";

/// Help text for the collision policy option
pub const ON_COLLISION_HELP: &str = "What to do when a target path already exists";

/// Help text for the always-write option
pub const ALWAYS_WRITE_HELP: &str = "Write every HTML file back, even when no reference changed";

/// Help text for the parallel option
pub const PARALLEL_HELP: &str = "Rewrite HTML files in parallel";

/// Help text for the skip option
pub const SKIP_HELP: &str = "Skip a pass (can be used multiple times)";

/// Message logged after a successful run
pub const COMPLETE_MESSAGE: &str = "Postbuild processing complete.";

/// Prefix of the message logged after a failed run
pub const ERROR_PREFIX: &str = "Postbuild error";
