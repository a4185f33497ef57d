//! Session 3: load cells through the HX711 ADC.

use anyhow::{Context, Result};
use tracing::info;

use crate::command_runner::run_tool;
use crate::fs_ops;
use crate::tools::pip::PipInstallArgs;
use crate::unit::{Check, ProvisionContext, Unit};
use crate::units::clone_into;

pub const HX711_REPO: &str = "https://github.com/PortableBalanceLab/hx711-multi";
pub const HX711_DIR: &str = "hx711-multi";

pub fn unit() -> Unit {
    Unit::new("s3")
        .description("Session 3: load cell readings through hx711-multi")
        .system_packages(["git", "automake", "build-essential", "python3-tk"])
        .custom_install(install_hx711_multi)
        .self_tests([
            Check::can_import("hx711_multi"),
            Check::can_import("hx711_multi.hx711"),
            Check::module_has_attr("hx711_multi", "HX711"),
            Check::module_has_attr("hx711_multi.hx711", "HX711"),
            Check::dir_exists(HX711_DIR),
            Check::file_exists(format!("{}/tests/identify.py", HX711_DIR)),
            Check::file_exists(format!("{}/tests/calibrate.py", HX711_DIR)),
            Check::can_import("RPi.GPIO"),
            Check::can_import("matplotlib"),
            // the lab builds an animated plot
            Check::can_import("matplotlib.animation"),
        ])
}

/// Place hx711-multi at `<root>/hx711-multi` and pip-install it from there.
///
/// The checkout stays on disk because the session runs
/// `tests/calibrate.py` from it; the pip install lets students
/// `import hx711_multi` from anywhere.
pub fn install_hx711_multi(ctx: &ProvisionContext<'_>) -> Result<()> {
    info!("starting installing hx711-multi");
    let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
    let checkout = clone_into(ctx, HX711_REPO, temp_dir.path(), HX711_DIR)?;

    let dest = ctx.install_path(HX711_DIR);
    fs_ops::replace_dir(&checkout, &dest)?;

    let pip = PipInstallArgs::new(
        ctx.config.language_package_manager.clone(),
        [dest.display().to_string()],
    );
    run_tool(ctx.runner, &pip).context("Failed to pip install hx711-multi")?;

    fs_ops::log_dir_contents(&dest);
    info!("finished installing hx711-multi");
    Ok(())
}
