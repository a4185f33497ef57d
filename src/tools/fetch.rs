//! Type-safe arguments for HTTP downloads via `curl`.

use std::path::PathBuf;

use crate::tool_traits::ToolArgs;

/// `curl -fsSL -o <dest> <url>`
///
/// `-f` makes HTTP errors (404 etc.) a non-zero exit instead of writing the
/// error page to `dest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchArgs {
    pub url: String,
    pub dest: PathBuf,
}

impl ToolArgs for FetchArgs {
    fn program(&self) -> &str {
        "curl"
    }

    fn to_cli_args(&self) -> Vec<String> {
        vec![
            "-fsSL".to_string(),
            "-o".to_string(),
            self.dest.display().to_string(),
            self.url.clone(),
        ]
    }
}
