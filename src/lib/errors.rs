use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating the launcher config file.
#[derive(Debug, Error)]
pub enum LauncherConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
    #[error("Failed to resolve current directory: {source}")]
    CurrentDir {
        #[source]
        source: io::Error,
    },
}

impl LauncherConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Unsupported enumerated values on the CLI surface.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Unknown kws model: {value}")]
    UnknownModel { value: String },
    #[error("Unknown autotune configuration: {value}")]
    UnknownAutotune { value: String },
}

/// Failures while launching the toolchain shell.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Failed to spawn toolchain shell: {source}")]
    Spawn {
        #[source]
        source: io::Error,
    },
}

/// Failures while extracting metrics from the session report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Workspace root {path} does not exist")]
    WorkspaceMissing { path: PathBuf },
    #[error("Failed to open report {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Failed to read report {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("No data rows found in report {path}")]
    NoRows { path: PathBuf },
    #[error("Report {path} is missing column `{column}`")]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("Report {path} has invalid `{column}` value `{value}`")]
    InvalidValue {
        path: PathBuf,
        column: &'static str,
        value: String,
    },
}
