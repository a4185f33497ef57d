//! Type-safe external tool argument contracts.
//!
//! This module provides the `ToolArgs` trait for ensuring compile-time correctness
//! of the arguments handed to external tools (`apt-get`, `pip`, `raspi-config`,
//! `git`, `curl`). Instead of raw string vectors, Rust structs implement this
//! trait to produce the exact command line and environment for one invocation.
//!
//! # Design Goals
//!
//! 1. **Compile-Time Safety**: Flag mismatches (e.g., `get_camera` vs `do_camera`)
//!    live in one struct each, not scattered across format strings.
//! 2. **Single Source of Truth**: The struct definition IS the contract.
//! 3. **Dry-Run Awareness**: Each contract states whether it mutates the host.

/// Trait for typed external tool arguments.
///
/// Implementors define the mapping between Rust struct fields and the
/// tool's command line. The execution layer (`command_runner`) turns an
/// implementor into an `Invocation` via `Invocation::from_tool`.
///
/// # Contract
///
/// - `program()`: Executable name or path, resolved through `PATH`.
/// - `to_cli_args()`: Arguments exactly as the tool expects them.
/// - `get_env_vars()`: Extra environment variables for the child process.
/// - `is_destructive()`: Whether the call changes host state.
/// - `captures_output()`: Whether stdout is needed by the caller.
///
/// # Example
///
/// ```ignore
/// use pbl::tools::apt::AptInstallArgs;
///
/// let args = AptInstallArgs::new("apt-get", ["git", "curl"]);
///
/// let cli_args = args.to_cli_args();  // ["install", "-y", "curl", "git"]
/// let env_vars = args.get_env_vars(); // [("DEBIAN_FRONTEND", "noninteractive")]
/// ```
pub trait ToolArgs {
    /// Executable to run.
    fn program(&self) -> &str;

    /// Convert struct fields to CLI arguments.
    fn to_cli_args(&self) -> Vec<String>;

    /// Get required environment variables.
    fn get_env_vars(&self) -> Vec<(String, String)> {
        vec![]
    }

    /// Whether this invocation modifies the host.
    ///
    /// Destructive invocations are skipped (and logged) in dry-run mode.
    /// Read-only queries still execute so the preview is realistic.
    fn is_destructive(&self) -> bool {
        true
    }

    /// Whether the caller needs the tool's stdout.
    ///
    /// Long-running installs inherit the terminal so the operator sees
    /// progress; queries capture their output for parsing.
    fn captures_output(&self) -> bool {
        false
    }
}
