//! Type-safe arguments for `git clone`.

use std::path::PathBuf;

use crate::tool_traits::ToolArgs;

/// Type-safe arguments for `git clone`.
///
/// # Field to Flag Mapping
///
/// | Rust Field | CLI Flag | Notes |
/// |------------|----------|-------|
/// | `depth`    | `--depth=<n>` | Omitted for a full clone |
/// | `url`      | positional | Repository URL |
/// | `dest`     | positional | Must not exist yet |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCloneArgs {
    pub url: String,
    pub dest: PathBuf,
    pub depth: Option<u32>,
}

impl GitCloneArgs {
    /// A `--depth=1` clone, which is all the course material needs.
    pub fn shallow(url: impl Into<String>, dest: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            dest: dest.into(),
            depth: Some(1),
        }
    }
}

impl ToolArgs for GitCloneArgs {
    fn program(&self) -> &str {
        "git"
    }

    fn to_cli_args(&self) -> Vec<String> {
        let mut args = vec!["clone".to_string()];
        if let Some(depth) = self.depth {
            args.push(format!("--depth={}", depth));
        }
        args.push(self.url.clone());
        args.push(self.dest.display().to_string());
        args
    }
}
