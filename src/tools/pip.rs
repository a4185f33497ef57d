//! Type-safe arguments for the Python package manager.

use std::collections::BTreeSet;

use crate::tool_traits::ToolArgs;

/// Type-safe arguments for a batched `pip install`.
///
/// Entries may be package names (`numpy`) or local paths
/// (`/opt/hx711-multi`); pip accepts both positionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipInstallArgs {
    /// pip executable (`pip`, `pip3`, ...).
    pub program: String,
    /// Requirements to install in one call.
    pub requirements: BTreeSet<String>,
}

impl PipInstallArgs {
    pub fn new<I, S>(program: impl Into<String>, requirements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            requirements: requirements.into_iter().map(Into::into).collect(),
        }
    }
}

impl ToolArgs for PipInstallArgs {
    fn program(&self) -> &str {
        &self.program
    }

    fn to_cli_args(&self) -> Vec<String> {
        let mut args = vec!["install".to_string()];
        args.extend(self.requirements.iter().cloned());
        args
    }
}
