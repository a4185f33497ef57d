//! Error handling module for pbl
//!
//! Provides centralized error handling with proper error types using thiserror.
//! External-tool failures, unknown unit names and failed custom-install hooks
//! all propagate to the entry point as a `ProvisionError`.

use thiserror::Error;

/// Main error type for provisioning operations
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// IO errors (file operations, temp dirs, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An external tool could not be started at all
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// An external tool ran but exited unsuccessfully
    #[error("`{command}` failed (exit code {}): {stderr}", display_code(.code))]
    ToolFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// An external tool produced output that could not be interpreted
    #[error("Unexpected output from `{command}`: {output:?}")]
    MalformedOutput { command: String, output: String },

    /// The caller named a unit that is not in the registry
    #[error("Unknown unit `{name}` (valid units: {valid})")]
    UnknownUnit { name: String, valid: String },

    /// A unit's custom-install or package-source hook failed
    #[error("Custom install step for `{unit}` failed: {source:#}")]
    CustomInstall {
        unit: String,
        #[source]
        source: anyhow::Error,
    },

    /// Pre-flight environment verification failed
    #[error("Pre-flight check failed: {0}")]
    Preflight(String),

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

/// Result type alias for provisioning operations
pub type Result<T> = std::result::Result<T, ProvisionError>;

// Convenient error constructors
impl ProvisionError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a pre-flight error
    pub fn preflight(msg: impl Into<String>) -> Self {
        Self::Preflight(msg.into())
    }

    /// Wrap a failed hook, keeping the unit name for the log
    pub fn custom_install(unit: impl Into<String>, source: anyhow::Error) -> Self {
        Self::CustomInstall {
            unit: unit.into(),
            source,
        }
    }
}
