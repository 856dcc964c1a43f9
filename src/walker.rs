//! Depth-first directory traversal
//!
//! Every pass walks the output tree with [`walk`]. The listing of a
//! directory is read once, when the walker enters it, so nodes a pass
//! creates next to an entry it is processing are not visited again.

use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};

use log::trace;

use crate::errors::{Result, file_operation_error};

/// Kind of a filesystem node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

/// A file or directory found during traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub path: PathBuf,
    pub kind: NodeKind,
}

impl Node {
    /// Classify the node at `path`, following symlinks
    pub fn stat(path: PathBuf) -> Result<Self> {
        let metadata =
            fs::metadata(&path).map_err(|e| file_operation_error(e, path.clone(), "stat"))?;
        let kind = if metadata.is_dir() {
            NodeKind::Directory
        } else {
            NodeKind::File
        };
        Ok(Node { path, kind })
    }

    /// The final path component, or `None` when it is not valid UTF-8
    pub fn file_name(&self) -> Option<&str> {
        let name = self.path.file_name().and_then(|name| name.to_str());
        if name.is_none() {
            trace!("Skipping non UTF-8 name {}", self.path.display());
        }
        name
    }

    /// The directory holding this node
    pub fn parent(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// One directory level on the work stack
struct Level {
    directory: PathBuf,
    entries: Vec<PathBuf>,
    next: usize,
}

impl Level {
    fn open(directory: PathBuf) -> Result<Self> {
        let listing: ReadDir = fs::read_dir(&directory)
            .map_err(|e| file_operation_error(e, directory.clone(), "read directory"))?;

        let entries = listing
            .map(|entry| {
                entry
                    .map(|e| e.path())
                    .map_err(|e| file_operation_error(e, directory.clone(), "read directory"))
            })
            .collect::<Result<Vec<PathBuf>>>()?;

        trace!(
            "Entered {} with {} entries",
            directory.display(),
            entries.len()
        );

        Ok(Level {
            directory,
            entries,
            next: 0,
        })
    }
}

/// Walks `root` depth-first and calls `visit` for every file
///
/// Entries are visited in the order the filesystem lists them. A
/// subdirectory is walked completely before its later siblings. The walk
/// uses an explicit stack, so tree depth is not limited by the call stack.
///
/// # Errors
/// The first listing, stat or visitor failure aborts the walk.
pub fn walk<F>(root: &Path, mut visit: F) -> Result<()>
where
    F: FnMut(&Node) -> Result<()>,
{
    let mut stack = vec![Level::open(root.to_path_buf())?];

    while let Some(level) = stack.last_mut() {
        let Some(path) = level.entries.get(level.next).cloned() else {
            trace!("Leaving {}", level.directory.display());
            stack.pop();
            continue;
        };
        level.next += 1;

        let node = Node::stat(path)?;
        match node.kind {
            NodeKind::Directory => stack.push(Level::open(node.path)?),
            NodeKind::File => visit(&node)?,
        }
    }

    Ok(())
}

/// Collects every file under `root` accepted by `predicate`, in walk order
pub fn collect_files<P>(root: &Path, mut predicate: P) -> Result<Vec<Node>>
where
    P: FnMut(&Node) -> bool,
{
    let mut files = Vec::new();
    walk(root, |node| {
        if predicate(node) {
            files.push(node.clone());
        }
        Ok(())
    })?;
    Ok(files)
}
