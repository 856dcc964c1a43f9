//! File operations shared by the passes
//!
//! Moves and renames go through [`relocate`], which applies the collision
//! policy and honours dry runs.

use std::fs::create_dir_all;
use std::io;
use std::path::Path;

use fs_extra::file::{CopyOptions, move_file};
use log::{debug, info, warn};

use crate::config::CollisionPolicy;
use crate::errors::{Result, file_operation_error, name_collision_error};
use crate::logging::mutation_line;
use crate::pipeline::RunContext;

/// Moves `source` to `target`, replacing or refusing an existing target
///
/// # Errors
/// * Returns a name collision error when the target exists and the policy is `error`
/// * Returns a file operation error when the move itself fails
pub fn relocate(source: &Path, target: &Path, ctx: &mut RunContext) -> Result<()> {
    if target.exists() {
        match ctx.config.on_collision {
            CollisionPolicy::Error => return Err(name_collision_error(target.to_path_buf())),
            CollisionPolicy::Overwrite => {
                warn!("Overwriting existing {}", target.display());
                ctx.report.collisions_overwritten += 1;
            }
        }
    }

    if ctx.dry_run {
        debug!(
            "Simulating move: {} -> {}",
            source.display(),
            target.display()
        );
        return Ok(());
    }

    let options = CopyOptions::new().overwrite(true);
    move_file(source, target, &options)
        .map_err(|e| file_operation_error(into_io_error(e), source.to_path_buf(), "move"))?;

    Ok(())
}

/// Creates `directory` and its missing parents, succeeding if it exists
pub fn ensure_directory(directory: &Path, dry_run: bool) -> Result<()> {
    if dry_run {
        return Ok(());
    }
    create_dir_all(directory)
        .map_err(|e| file_operation_error(e, directory.to_path_buf(), "create directory"))
}

/// Logs one mutation line at `info`
pub fn announce(dry_run: bool, action: &str, subject: &str) {
    info!("{}", mutation_line(dry_run, action, subject));
}

fn into_io_error(err: fs_extra::error::Error) -> io::Error {
    use fs_extra::error::ErrorKind;

    let message = err.to_string();
    match err.kind {
        ErrorKind::Io(source) => source,
        ErrorKind::NotFound => io::Error::new(io::ErrorKind::NotFound, message),
        ErrorKind::PermissionDenied => io::Error::new(io::ErrorKind::PermissionDenied, message),
        ErrorKind::AlreadyExists => io::Error::new(io::ErrorKind::AlreadyExists, message),
        _ => io::Error::other(message),
    }
}
