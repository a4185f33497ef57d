//! The PortableBalanceLab course units.
//!
//! Requirement lists are kept in Rust (not shell scripts) so they can be
//! checked in tests without running the installer, and so each one sits
//! next to the checks that verify it.
//!
//! | Unit   | Interfaces | Custom install |
//! |--------|------------|----------------|
//! | common | vnc        | - |
//! | l2     | -          | - |
//! | l3     | -          | - |
//! | s1     | camera     | coral example, posenet |
//! | s2     | i2c        | bcm2835, ICM20948.py |
//! | s3     | -          | hx711-multi |
//! | s4     | i2c        | - |

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::command_runner::{run_checked, run_tool, Invocation};
use crate::tools::fetch::FetchArgs;
use crate::tools::git::GitCloneArgs;
use crate::unit::ProvisionContext;

pub mod common;
pub mod l2;
pub mod l3;
pub mod s1;
pub mod s2;
pub mod s3;
pub mod s4;

// ============================================================================
// Hook building blocks
// ============================================================================

/// Shallow-clone `url` into `parent/<name>` and return that path.
pub(crate) fn clone_into(ctx: &ProvisionContext<'_>, url: &str, parent: &Path, name: &str) -> Result<PathBuf> {
    let dest = parent.join(name);
    run_tool(ctx.runner, &GitCloneArgs::shallow(url, &dest))
        .with_context(|| format!("Failed to clone {}", url))?;
    Ok(dest)
}

/// Download `url` to `dest`.
pub(crate) fn download(ctx: &ProvisionContext<'_>, url: &str, dest: &Path) -> Result<()> {
    let args = FetchArgs {
        url: url.to_string(),
        dest: dest.to_path_buf(),
    };
    run_tool(ctx.runner, &args).with_context(|| format!("Failed to download {}", url))?;
    Ok(())
}

/// Run `program args...` inside `dir`; non-zero exit is an error.
pub(crate) fn run_in(ctx: &ProvisionContext<'_>, dir: &Path, program: &str, args: &[&str]) -> Result<()> {
    let invocation = Invocation::new(program)
        .args(args.iter().copied())
        .current_dir(dir);
    run_checked(ctx.runner, &invocation)
        .with_context(|| format!("`{}` failed in {}", invocation, dir.display()))?;
    Ok(())
}
