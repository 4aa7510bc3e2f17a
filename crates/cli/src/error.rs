use std::path::PathBuf;

/// Bytesed error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Mapping with an empty `old` sequence
    #[error("invalid mapping: cannot replace an empty sequence")]
    InvalidMapping,

    /// Replace or chain requested with nothing registered
    #[error("no mappings registered")]
    NoMappings,

    /// Working file could not be opened or inspected
    #[error("file error: {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Read, write or rename failure during a pass
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed backslash escape in a mapping argument
    #[error("invalid escape in {input:?}: {message}")]
    Escape { input: String, message: String },

    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::File {
            path: path.into(),
            source,
        }
    }
}

/// Result type using bytesed Error
pub type Result<T> = std::result::Result<T, Error>;

/// A failed replace, with the bytes committed to the working file before
/// the failure.
///
/// `written == 0` means the working file was not replaced at all; any
/// other value means earlier sequential passes were committed.
#[derive(Debug, thiserror::Error)]
#[error("{source} ({written} bytes written before failure)")]
pub struct ReplaceError {
    pub written: u64,
    #[source]
    pub source: Error,
}

impl ReplaceError {
    pub(crate) fn new(written: u64, source: Error) -> Self {
        Self { written, source }
    }

    /// True when at least one pass was committed before the failure.
    pub fn is_partial(&self) -> bool {
        self.written > 0
    }
}

impl From<Error> for ReplaceError {
    fn from(source: Error) -> Self {
        Self { written: 0, source }
    }
}

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Every file replaced
    Success = 0,
    /// A pass failed mid-way
    ReplaceFailed = 1,
    /// Configuration, argument or mapping error
    ConfigError = 2,
    /// Internal error or unusable working file
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::InvalidMapping
            | Error::NoMappings
            | Error::Escape { .. }
            | Error::Config { .. }
            | Error::Argument(_) => ExitCode::ConfigError,
            Error::Io { .. } => ExitCode::ReplaceFailed,
            Error::File { .. } | Error::Internal(_) => ExitCode::InternalError,
        }
    }
}

impl From<&ReplaceError> for ExitCode {
    fn from(err: &ReplaceError) -> Self {
        ExitCode::from(&err.source)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
