//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues with reading or parsing package.json files
//! - SpecError: Dependency groups with the wrong shape (wrapped by ManifestError)
//! - ConfigError: Issues with CLI or pnpm configuration
//! - IoError: File system operation failures

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DependencyGroup;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// A worker task panicked or was cancelled
    #[error("inspection task failed: {message}")]
    TaskFailed { message: String },
}

impl AppError {
    /// Creates a new TaskFailed error
    pub fn task_failed(message: impl Into<String>) -> Self {
        AppError::TaskFailed {
            message: message.into(),
        }
    }
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// A dependency group inside the manifest has the wrong shape
    #[error("invalid manifest {path}: {source}")]
    Spec {
        path: PathBuf,
        #[source]
        source: SpecError,
    },

    /// Failed to read the transform script
    #[error("failed to read pnpmfile {path}: {source}")]
    ScriptReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised when a dependency group is not a `name -> version range` mapping
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// Group value is not an object of strings
    #[error("malformed {group} group: {message}")]
    MalformedGroup {
        group: DependencyGroup,
        message: String,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid package path
    #[error("invalid package path '{path}': {message}")]
    InvalidPackagePath { path: String, message: String },

    /// A path argument that exists but cannot be used
    #[error("invalid path '{path}': {message}")]
    InvalidPath { path: PathBuf, message: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Generic IO error
    #[error("IO error at {path}: {source}")]
    Generic {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Wraps a SpecError with the manifest path it came from
    pub fn spec(path: impl Into<PathBuf>, source: SpecError) -> Self {
        ManifestError::Spec {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ScriptReadError
    pub fn script_read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ScriptReadError {
            path: path.into(),
            source,
        }
    }
}

impl SpecError {
    /// Creates a new MalformedGroup error
    pub fn malformed_group(group: DependencyGroup, message: impl Into<String>) -> Self {
        SpecError::MalformedGroup {
            group,
            message: message.into(),
        }
    }

    /// Returns the group this error refers to
    pub fn group(&self) -> DependencyGroup {
        match self {
            SpecError::MalformedGroup { group, .. } => *group,
        }
    }
}

impl ConfigError {
    /// Creates a new InvalidPackagePath error
    pub fn invalid_package_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidPackagePath {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidPath error
    pub fn invalid_path(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::InvalidPath {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl IoError {
    /// Creates a new DirectoryNotFound error
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        IoError::DirectoryNotFound { path: path.into() }
    }

    /// Creates a new Generic IO error
    pub fn generic(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Generic {
            path: path.into(),
            source,
        }
    }
}
