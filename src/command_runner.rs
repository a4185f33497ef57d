//! Command execution for external tools
//!
//! Every shell-out in pbl goes through the `CommandRunner` trait so the
//! orchestration logic can be exercised without touching the host.
//! `SystemRunner` is the real implementation; tests supply a recording fake.
//!
//! Execution is synchronous: each invocation runs to completion before the
//! caller continues. There are no timeouts.

use crate::error::{ProvisionError, Result};
use crate::tool_traits::ToolArgs;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// One fully-described external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub cwd: Option<PathBuf>,
    pub destructive: bool,
    pub capture: bool,
}

impl Invocation {
    /// Start describing a command. Defaults to destructive, uncaptured,
    /// run in the current directory.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            cwd: None,
            destructive: true,
            capture: false,
        }
    }

    /// Build an invocation from a typed tool contract.
    pub fn from_tool<T: ToolArgs + ?Sized>(tool: &T) -> Self {
        Self {
            program: tool.program().to_string(),
            args: tool.to_cli_args(),
            env: tool.get_env_vars(),
            cwd: None,
            destructive: tool.is_destructive(),
            capture: tool.captures_output(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Mark as a read-only query whose stdout the caller parses.
    pub fn query(mut self) -> Self {
        self.destructive = false;
        self.capture = true;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Output from an external command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Standard output (empty unless the invocation captured it).
    pub stdout: String,
    /// Standard error (empty unless the invocation captured it).
    pub stderr: String,
    /// Exit code (None if terminated by signal).
    pub exit_code: Option<i32>,
    /// Whether the command exited successfully (exit code 0).
    pub success: bool,
    /// Whether the command was skipped because of dry-run mode.
    pub dry_run: bool,
}

impl CommandOutput {
    /// A successful, empty result.
    pub fn ok() -> Self {
        Self {
            exit_code: Some(0),
            success: true,
            ..Self::default()
        }
    }

    /// A successful result with the given stdout.
    pub fn with_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::ok()
        }
    }

    /// A failed result with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stderr: stderr.into(),
            exit_code: Some(code),
            success: false,
            ..Self::default()
        }
    }

    /// Check if the command succeeded and return a `ToolFailed` error if not.
    pub fn ensure_success(self, invocation: &Invocation) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(ProvisionError::ToolFailed {
                command: invocation.to_string(),
                code: self.exit_code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Executes external commands.
///
/// `run` only fails when the command cannot be started; a non-zero exit is
/// reported through `CommandOutput::success` so callers decide whether it
/// is fatal. Use `run_checked` for the common "non-zero is fatal" case.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput>;
}

/// Run an invocation and treat a non-zero exit as an error.
pub fn run_checked(runner: &dyn CommandRunner, invocation: &Invocation) -> Result<CommandOutput> {
    runner.run(invocation)?.ensure_success(invocation)
}

/// Run a typed tool contract and treat a non-zero exit as an error.
pub fn run_tool<T: ToolArgs + ?Sized>(runner: &dyn CommandRunner, tool: &T) -> Result<CommandOutput> {
    run_checked(runner, &Invocation::from_tool(tool))
}

/// Runs commands on the host with `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner {
    dry_run: bool,
}

impl SystemRunner {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        if self.dry_run && invocation.destructive {
            info!(command = %invocation, "[dry-run] skipping");
            return Ok(CommandOutput {
                dry_run: true,
                ..CommandOutput::ok()
            });
        }

        info!(command = %invocation, "running");

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).stdin(Stdio::null());
        for (key, value) in &invocation.env {
            cmd.env(key, value);
        }
        if let Some(dir) = &invocation.cwd {
            cmd.current_dir(dir);
        }

        let spawn_err = |source| ProvisionError::Spawn {
            command: invocation.to_string(),
            source,
        };

        let output = if invocation.capture {
            let output = cmd.output().map_err(spawn_err)?;
            CommandOutput {
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                exit_code: output.status.code(),
                success: output.status.success(),
                dry_run: false,
            }
        } else {
            let status = cmd.status().map_err(spawn_err)?;
            CommandOutput {
                exit_code: status.code(),
                success: status.success(),
                ..CommandOutput::default()
            }
        };

        debug!(
            command = %invocation,
            exit_code = ?output.exit_code,
            "finished"
        );
        Ok(output)
    }
}
