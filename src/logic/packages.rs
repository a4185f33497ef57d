//! Package installation
//!
//! Each installer aggregates its package set across the selected units and
//! invokes the package manager exactly once with the whole list, so the
//! manager resolves dependencies and conflicts across everything at once.
//! An empty set means no invocation at all. A non-zero exit is fatal.

use std::collections::BTreeSet;

use tracing::info;

use crate::command_runner::run_tool;
use crate::error::Result;
use crate::logic::aggregate::aggregate;
use crate::tools::apt::AptInstallArgs;
use crate::tools::pip::PipInstallArgs;
use crate::unit::{ProvisionContext, Requirement, Unit};

/// Install the union of every unit's OS packages in one call.
pub fn install_system_packages(ctx: &ProvisionContext<'_>, units: &[&Unit]) -> Result<BTreeSet<String>> {
    let packages = aggregate(units.iter().copied(), Requirement::SystemPackages);
    if packages.is_empty() {
        info!("no system packages required");
        return Ok(packages);
    }

    info!(count = packages.len(), "installing system packages");
    let args = AptInstallArgs::new(ctx.config.system_package_manager.clone(), packages.iter().cloned());
    run_tool(ctx.runner, &args)?;
    Ok(packages)
}

/// Install the union of every unit's Python packages in one call.
pub fn install_language_packages(ctx: &ProvisionContext<'_>, units: &[&Unit]) -> Result<BTreeSet<String>> {
    let packages = aggregate(units.iter().copied(), Requirement::LanguagePackages);
    if packages.is_empty() {
        info!("no language packages required");
        return Ok(packages);
    }

    info!(count = packages.len(), "installing language packages");
    let args = PipInstallArgs::new(ctx.config.language_package_manager.clone(), packages.iter().cloned());
    run_tool(ctx.runner, &args)?;
    Ok(packages)
}
