//! Run context
//!
//! This module defines the state handed to every pass.

use std::fmt;

use crate::config::Config;

/// Context for one pipeline run
///
/// Passes read their settings from `config` and add their counts to
/// `report`. Nothing else is carried between passes; each pass looks at
/// the filesystem again.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// The configuration
    pub config: Config,
    /// Whether to only log planned changes
    pub dry_run: bool,
    /// Counts collected so far
    pub report: RunReport,
}

impl RunContext {
    /// Creates a new run context
    pub fn new(config: Config, dry_run: bool) -> Self {
        RunContext {
            config,
            dry_run,
            report: RunReport::default(),
        }
    }
}

/// What a run changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// HTML pages moved into their own directory
    pub pages_moved: usize,
    /// Images renamed to the single target extension
    pub images_renamed: usize,
    /// HTML files inspected for image references
    pub html_scanned: usize,
    /// HTML files written back
    pub html_rewritten: usize,
    /// Image references rewritten across all files
    pub references_rewritten: usize,
    /// Existing targets replaced by a move or rename
    pub collisions_overwritten: usize,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pages moved, {} images renamed, {} references rewritten in {} of {} HTML files",
            self.pages_moved,
            self.images_renamed,
            self.references_rewritten,
            self.html_rewritten,
            self.html_scanned
        )?;
        if self.collisions_overwritten > 0 {
            write!(f, ", {} existing files overwritten", self.collisions_overwritten)?;
        }
        Ok(())
    }
}
