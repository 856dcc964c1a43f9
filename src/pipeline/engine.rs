//! Pipeline engine
//!
//! This module runs the passes over one root, in a fixed order.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, info, warn};
use once_cell::sync::Lazy;

use crate::config::Config;
use crate::errors::{Error, Result, file_operation_error};
use crate::passes::{normalize_extensions, prettify_urls, rewrite_references};

use super::context::{RunContext, RunReport};

/// Roots currently being processed in this process
static ACTIVE_ROOTS: Lazy<Mutex<HashSet<PathBuf>>> = Lazy::new(|| Mutex::new(HashSet::new()));

/// Marks a root as busy until dropped
struct RunGuard {
    root: PathBuf,
}

impl RunGuard {
    fn acquire(root: &Path) -> Result<Self> {
        let root = fs::canonicalize(root)
            .map_err(|e| file_operation_error(e, root.to_path_buf(), "resolve"))?;
        let mut active = ACTIVE_ROOTS.lock().unwrap_or_else(|p| p.into_inner());
        if !active.insert(root.clone()) {
            return Err(Error::AlreadyRunning { root });
        }
        Ok(RunGuard { root })
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        let mut active = ACTIVE_ROOTS.lock().unwrap_or_else(|p| p.into_inner());
        active.remove(&self.root);
    }
}

fn check_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(Error::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(Error::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

/// Runs the enabled passes over `config.root`
///
/// The passes run strictly one after another:
/// 1. pretty URLs (`name.html` → `name/index.html`)
/// 2. extension normalization (`name.png.webp` → `name.webp`)
/// 3. reference rewriting (`assets/img/name.png` → `assets/img/name.webp`)
///
/// Normalization has finished before rewriting starts, so rewritten
/// references point at files that already exist.
///
/// # Errors
/// The first error aborts the run. Changes made before it stay on disk.
/// A second run on the same root while one is active in this process fails
/// with [`Error::AlreadyRunning`].
pub fn run(config: Config, dry_run: bool) -> Result<RunReport> {
    check_root(&config.root)?;
    let _guard = RunGuard::acquire(&config.root)?;

    info!(
        "Processing {}{}...",
        config.root.display(),
        if dry_run { " (dry run)" } else { "" }
    );

    let mut ctx = RunContext::new(config, dry_run);
    let passes = ctx.config.passes.clone();
    if passes.rewrite && !passes.normalize {
        warn!("Rewriting references without normalizing extensions, rewritten references may dangle");
    }

    if passes.prettify {
        prettify_urls(&mut ctx)?;
    } else {
        debug!("Skipping pretty URLs");
    }

    if passes.normalize {
        normalize_extensions(&mut ctx)?;
    } else {
        debug!("Skipping extension normalization");
    }

    if passes.rewrite {
        rewrite_references(&mut ctx)?;
    } else {
        debug!("Skipping reference rewriting");
    }

    Ok(ctx.report)
}
