//! Error types for panel generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or saving a development view.
#[derive(Error, Debug)]
pub enum PanelError {
    /// A parameter is missing, out of range, or inconsistent with the others.
    #[error("invalid parameter `{field}`: {reason}")]
    Config {
        /// Name of the offending parameter.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The parameter file could not be parsed.
    #[error("failed to parse parameters: {0}")]
    Params(#[from] toml::de::Error),

    /// The parameter set could not be rendered as TOML.
    #[error("failed to serialize parameters: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Reading parameters or writing the drawing file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File that was being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl PanelError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Config {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for panel operations.
pub type Result<T> = std::result::Result<T, PanelError>;
