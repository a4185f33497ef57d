//! Installer module
//!
//! Composes the install steps in a fixed order over the selected units:
//!
//! | Stage | What it does |
//! |-------|--------------|
//! | `Interfaces` | enable hardware interfaces |
//! | `PackageSources` | register extra apt sources (unit hooks) |
//! | `SystemPackages` | one batched `apt-get install` |
//! | `LanguagePackages` | one batched `pip install` |
//! | `CustomInstall` | clone/download/copy (unit hooks) |
//!
//! Interfaces come first so packages that probe hardware find it enabled.
//! Packages come before custom installs because the hooks use what the
//! package step installed (git, a C toolchain).
//!
//! There is no rollback. A failure leaves the host partly configured and the
//! operator re-runs `pbl install`; every stage is idempotent.

use std::collections::BTreeSet;

use strum::{Display, EnumIter};
use tracing::{error, info};

use crate::error::Result;
use crate::logic::custom_install::{run_custom_install_steps, run_package_source_steps};
use crate::logic::interfaces::{configure_interfaces, InterfaceChange};
use crate::logic::packages::{install_language_packages, install_system_packages};
use crate::registry::Registry;
use crate::unit::{ProvisionContext, Unit};

/// Install stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum InstallStage {
    #[strum(serialize = "configuring hardware interfaces")]
    Interfaces,
    #[strum(serialize = "registering package sources")]
    PackageSources,
    #[strum(serialize = "installing system packages")]
    SystemPackages,
    #[strum(serialize = "installing language packages")]
    LanguagePackages,
    #[strum(serialize = "running custom install steps")]
    CustomInstall,
}

/// What an install run acted on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallSummary {
    pub units: Vec<String>,
    pub interfaces: Vec<InterfaceChange>,
    pub package_source_hooks: Vec<String>,
    pub system_packages: BTreeSet<String>,
    pub language_packages: BTreeSet<String>,
    pub custom_install_hooks: Vec<String>,
}

/// Run one stage between banners, logging which stage failed.
fn stage<T>(stage: InstallStage, run: impl FnOnce() -> Result<T>) -> Result<T> {
    info!("----- starting {} -----", stage);
    match run() {
        Ok(value) => {
            info!("----- finished {} -----", stage);
            Ok(value)
        }
        Err(e) => {
            error!("----- failed {}: {} -----", stage, e);
            Err(e)
        }
    }
}

/// Configure and install everything `units` need.
pub fn install(ctx: &ProvisionContext<'_>, units: &[&Unit]) -> Result<InstallSummary> {
    let names: Vec<String> = units.iter().map(|u| u.name.clone()).collect();
    info!(units = %names.join(", "), "----- starting install of Pi for PBL -----");

    let interfaces = stage(InstallStage::Interfaces, || configure_interfaces(ctx, units))?;
    let package_source_hooks =
        stage(InstallStage::PackageSources, || run_package_source_steps(ctx, units))?;
    let system_packages =
        stage(InstallStage::SystemPackages, || install_system_packages(ctx, units))?;
    let language_packages =
        stage(InstallStage::LanguagePackages, || install_language_packages(ctx, units))?;
    let custom_install_hooks =
        stage(InstallStage::CustomInstall, || run_custom_install_steps(ctx, units))?;

    info!("----- finished install of Pi for PBL: enjoy :> -----");
    Ok(InstallSummary {
        units: names,
        interfaces,
        package_source_hooks,
        system_packages,
        language_packages,
        custom_install_hooks,
    })
}

/// Resolve an include/exclude request against `registry`, then install.
///
/// Unknown names fail here, before any stage runs.
pub fn install_selected(
    ctx: &ProvisionContext<'_>,
    registry: &Registry,
    include: &[String],
    exclude: &[String],
) -> Result<InstallSummary> {
    let units = registry.select(include, exclude)?;
    install(ctx, &units)
}
