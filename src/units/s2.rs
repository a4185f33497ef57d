//! Session 2: reading the IMU on the Waveshare Sense HAT (B).
//!
//! The HAT's guide requires the bcm2835 C library, and the session hands
//! students `ICM20948.py` at a fixed path.

use anyhow::{Context, Result};
use tracing::info;

use crate::fs_ops;
use crate::unit::{Check, ProvisionContext, Unit};
use crate::units::{clone_into, run_in};

pub const BCM2835_REPO: &str = "https://github.com/PortableBalanceLab/bcm2835";
pub const ICM20948_REPO: &str = "https://github.com/PortableBalanceLab/ICM20948";
pub const ICM20948_SCRIPT: &str = "ICM20948.py";

pub fn unit() -> Unit {
    Unit::new("s2")
        .description("Session 2: IMU readings from the Sense HAT")
        .interfaces(["i2c"])
        .system_packages(["git", "automake", "build-essential"])
        // Sense HAT (B) python dependencies
        .language_packages(["RPi.GPIO", "spidev", "smbus"])
        .custom_install(|ctx| {
            install_bcm2835(ctx)?;
            install_icm20948(ctx)
        })
        .self_tests([
            Check::can_import("smbus"),
            Check::file_exists(ICM20948_SCRIPT),
            Check::can_import("matplotlib"),
            Check::can_import("matplotlib.animation"),
        ])
}

/// Build and install bcm2835 system-wide.
pub fn install_bcm2835(ctx: &ProvisionContext<'_>) -> Result<()> {
    info!("starting installing bcm2835");
    let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
    let source = clone_into(ctx, BCM2835_REPO, temp_dir.path(), "bcm2835")?;

    // git doesn't keep the release tarball's timestamps, so regenerate
    run_in(ctx, &source, "autoreconf", &["-f", "-i"])?;
    run_in(ctx, &source, "sh", &["./configure"])?;
    run_in(ctx, &source, "make", &[])?;
    run_in(ctx, &source, "make", &["check"])?;
    run_in(ctx, &source, "make", &["install"])?;

    info!("finished installing bcm2835");
    Ok(())
}

/// Place `ICM20948.py` at `<root>/ICM20948.py`.
pub fn install_icm20948(ctx: &ProvisionContext<'_>) -> Result<()> {
    info!("starting installing icm20948");
    let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
    let checkout = clone_into(ctx, ICM20948_REPO, temp_dir.path(), "ICM20948")?;

    let script = checkout.join(ICM20948_SCRIPT);
    fs_ops::set_mode(&script, 0o644)?;
    fs_ops::replace_file(&script, &ctx.install_path(ICM20948_SCRIPT))?;

    fs_ops::log_dir_contents(ctx.install_root());
    info!("finished installing icm20948");
    Ok(())
}
