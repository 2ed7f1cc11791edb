//! Global error handling for unificar
//!
//! Two kinds of failure exist. [`UnificarError`] aborts a run (bad root,
//! failed final write). [`SkipReason`] describes a single file that could not
//! be read; it is recorded and logged but never stops the run.

use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Global error type for unificar operations
#[derive(Error, Debug)]
pub enum UnificarError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Directory traversal errors
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writer errors
    #[error("Writer error: {0}")]
    Writer(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Specialized Result type for unificar operations
pub type Result<T> = std::result::Result<T, UnificarError>;

/// Why a file was left out of the output
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Opening or reading the file failed
    #[error("{message}")]
    Io {
        /// Kind of the underlying I/O error
        kind: io::ErrorKind,
        /// Rendered I/O error
        message: String,
    },

    /// The file is not valid UTF-8
    #[error("invalid UTF-8 after {valid_up_to} bytes")]
    Decode {
        /// Length of the valid UTF-8 prefix
        valid_up_to: usize,
    },

    /// The entry is neither a regular file nor a link to one
    #[error("not a regular file")]
    NotAFile,
}

impl From<io::Error> for SkipReason {
    fn from(err: io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<FromUtf8Error> for SkipReason {
    fn from(err: FromUtf8Error) -> Self {
        Self::Decode {
            valid_up_to: err.utf8_error().valid_up_to(),
        }
    }
}

/// Creates an UnificarError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::UnificarError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for adding context to errors
pub trait ResultExt<T, E> {
    /// Add additional context to an error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| {
            let context = f();
            UnificarError::Writer(format!("{}: {}", context, e))
        })
    }
}

// Lets `main` and the tests return io::Result
impl From<UnificarError> for io::Error {
    fn from(err: UnificarError) -> Self {
        match err {
            UnificarError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
