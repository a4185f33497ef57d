//! Type-safe arguments for the system package manager.
//!
//! - `AptInstallArgs` for one batched `apt-get install -y ...`
//! - `AptUpdateArgs` for `apt-get update`
//! - `AptKeyAddArgs` for `apt-key add <file>`

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::tool_traits::ToolArgs;

// ============================================================================
// Install
// ============================================================================

/// Type-safe arguments for a batched `apt-get install`.
///
/// # Field to Flag Mapping
///
/// | Rust Field | CLI Flag | Notes |
/// |------------|----------|-------|
/// | `packages` | positional | Sorted, deduplicated |
/// | (always)   | `-y`     | Non-interactive confirmation |
///
/// `DEBIAN_FRONTEND=noninteractive` keeps debconf from prompting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AptInstallArgs {
    /// Package manager executable (usually `apt-get`).
    pub program: String,
    /// Packages to install in one call.
    pub packages: BTreeSet<String>,
}

impl AptInstallArgs {
    pub fn new<I, S>(program: impl Into<String>, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            packages: packages.into_iter().map(Into::into).collect(),
        }
    }
}

impl ToolArgs for AptInstallArgs {
    fn program(&self) -> &str {
        &self.program
    }

    fn to_cli_args(&self) -> Vec<String> {
        let mut args = vec!["install".to_string(), "-y".to_string()];
        args.extend(self.packages.iter().cloned());
        args
    }

    fn get_env_vars(&self) -> Vec<(String, String)> {
        vec![("DEBIAN_FRONTEND".to_string(), "noninteractive".to_string())]
    }
}

// ============================================================================
// Update
// ============================================================================

/// `apt-get update`, needed after registering a new package source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AptUpdateArgs {
    pub program: String,
}

impl ToolArgs for AptUpdateArgs {
    fn program(&self) -> &str {
        &self.program
    }

    fn to_cli_args(&self) -> Vec<String> {
        vec!["update".to_string()]
    }
}

// ============================================================================
// Signing keys
// ============================================================================

/// `apt-key add <file>`, trusting a downloaded repository signing key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AptKeyAddArgs {
    pub key_file: PathBuf,
}

impl ToolArgs for AptKeyAddArgs {
    fn program(&self) -> &str {
        "apt-key"
    }

    fn to_cli_args(&self) -> Vec<String> {
        vec!["add".to_string(), self.key_file.display().to_string()]
    }
}
