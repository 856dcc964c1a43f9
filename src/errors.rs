use regex::Error as RegexError;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error type for the postbuild pipeline
#[derive(Debug)]
pub enum Error {
    /// A filesystem call failed
    FileOperation {
        source: io::Error,
        path: PathBuf,
        operation: String,
    },
    /// A target path is already taken and the collision policy forbids overwriting
    NameCollision { path: PathBuf },
    /// The root directory does not exist
    RootNotFound { path: PathBuf },
    /// The root path exists but is not a directory
    NotADirectory { path: PathBuf },
    /// A rewrite pattern failed to compile
    PatternMatching { source: RegexError, pattern: String },
    /// Another run is already working on the same root
    AlreadyRunning { root: PathBuf },
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    NameCollision,
    Io,
    Config,
    Other,
}

impl Error {
    /// Classify the error, looking through to the underlying I/O error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::FileOperation { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => ErrorKind::NotFound,
                io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
                io::ErrorKind::AlreadyExists
                | io::ErrorKind::DirectoryNotEmpty
                | io::ErrorKind::IsADirectory
                | io::ErrorKind::NotADirectory => ErrorKind::NameCollision,
                _ => ErrorKind::Io,
            },
            Error::NameCollision { .. } => ErrorKind::NameCollision,
            Error::RootNotFound { .. } => ErrorKind::NotFound,
            Error::NotADirectory { .. } => ErrorKind::NameCollision,
            Error::PatternMatching { .. } => ErrorKind::Config,
            Error::AlreadyRunning { .. } => ErrorKind::Other,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileOperation {
                path, operation, ..
            } => {
                write!(f, "Failed to {} {}", operation, path.display())
            }
            Error::NameCollision { path } => {
                write!(f, "Target already exists: {}", path.display())
            }
            Error::RootNotFound { path } => {
                write!(f, "Root directory not found: {}", path.display())
            }
            Error::NotADirectory { path } => {
                write!(f, "Root path is not a directory: {}", path.display())
            }
            Error::PatternMatching { pattern, .. } => {
                write!(f, "Invalid pattern: {pattern}")
            }
            Error::AlreadyRunning { root } => {
                write!(f, "Another run is already processing {}", root.display())
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::FileOperation { source, .. } => Some(source),
            Error::PatternMatching { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type used by the library
pub type Result<T> = std::result::Result<T, Error>;

/// Helper function to create a file operation error
pub fn file_operation_error(err: io::Error, path: PathBuf, operation: &str) -> Error {
    Error::FileOperation {
        source: err,
        path,
        operation: operation.to_string(),
    }
}

/// Helper function to create a name collision error
pub fn name_collision_error(path: PathBuf) -> Error {
    Error::NameCollision { path }
}

/// Helper function to create a pattern matching error
pub fn pattern_matching_error(err: RegexError, pattern: &str) -> Error {
    Error::PatternMatching {
        source: err,
        pattern: pattern.to_string(),
    }
}
