//! Custom-install hook execution
//!
//! Runs the optional per-unit hooks in unit order. Units without the hook
//! are skipped; that is the normal case and only shows up at debug level.
//!
//! # Failure Policy
//!
//! **FATAL**: the first failing hook aborts the run. Hooks are not isolated
//! from one another and nothing is retried; re-running the install is the
//! recovery path, which works because every hook replaces its destination.

use tracing::{debug, info};

use crate::error::{ProvisionError, Result};
use crate::unit::{Hook, ProvisionContext, Unit};

/// Run every unit's `package_sources` hook.
pub fn run_package_source_steps(ctx: &ProvisionContext<'_>, units: &[&Unit]) -> Result<Vec<String>> {
    run_hooks(ctx, units, "package_sources", |unit| unit.package_sources.as_ref())
}

/// Run every unit's `custom_install` hook.
pub fn run_custom_install_steps(ctx: &ProvisionContext<'_>, units: &[&Unit]) -> Result<Vec<String>> {
    run_hooks(ctx, units, "custom_install", |unit| unit.custom_install.as_ref())
}

/// Returns the names of the units whose hook ran.
fn run_hooks<F>(ctx: &ProvisionContext<'_>, units: &[&Unit], hook_name: &str, select: F) -> Result<Vec<String>>
where
    F: Fn(&Unit) -> Option<&Hook>,
{
    let mut ran = Vec::new();
    for &unit in units {
        let Some(hook) = select(unit) else {
            debug!(unit = %unit.name, "no {} step: skipping", hook_name);
            continue;
        };

        if ctx.dry_run {
            info!(unit = %unit.name, "[dry-run] would run {}", hook_name);
            continue;
        }

        info!("--- starting {}.{} ---", unit.name, hook_name);
        hook(ctx).map_err(|e| ProvisionError::custom_install(&unit.name, e))?;
        info!("--- finished {}.{} ---", unit.name, hook_name);
        ran.push(unit.name.clone());
    }
    Ok(ran)
}
