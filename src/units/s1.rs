//! Session 1: camera booth and image classification on the Coral Edge TPU.
//!
//! Installs two things students are pointed at by path:
//!
//! - `<root>/coral_example/`: the google-coral bird classification example
//!   (scripts, CPU and Edge TPU models, labels, a test image)
//! - `<root>/project-posenet/`: posenet source the students modify into a
//!   camera booth
//!
//! The Edge TPU runtime packages come from Google's coral apt repository,
//! which is registered before the system package step.

use anyhow::{Context, Result};
use std::fs;
use tracing::info;

use crate::command_runner::run_tool;
use crate::fs_ops;
use crate::tools::apt::{AptKeyAddArgs, AptUpdateArgs};
use crate::unit::{Check, CheckKind, ProvisionContext, Unit};
use crate::units::{clone_into, download, run_in};

pub const CORAL_APT_SOURCE: &str =
    "deb https://packages.cloud.google.com/apt coral-edgetpu-stable main";
pub const CORAL_APT_LIST: &str = "coral-edgetpu.list";
pub const CORAL_APT_KEY_URL: &str = "https://packages.cloud.google.com/apt/doc/apt-key.gpg";

pub const CORAL_ASSETS_BASE_URL: &str = "https://github.com/google-coral/edgetpu/raw/master/test_data";
pub const CORAL_ASSETS: &[&str] = &[
    // Edge TPU model
    "mobilenet_v2_1.0_224_inat_bird_quant_edgetpu.tflite",
    // CPU model
    "mobilenet_v2_1.0_224_inat_bird_quant.tflite",
    "inat_bird_labels.txt",
    "parrot.jpg",
];
/// Pinned so the scripts match what the practical handout describes.
pub const CORAL_SCRIPTS_BASE_URL: &str = "https://raw.githubusercontent.com/google-coral/tflite/eced31ac01e9c2636150decef7d3c335d0feb304/python/examples/classification";
pub const CORAL_SCRIPTS: &[&str] = &["classify.py", "classify_image.py"];
pub const CORAL_EXAMPLE_DIR: &str = "coral_example";

pub const POSENET_REPO: &str = "https://github.com/PortableBalanceLab/project-posenet";
pub const POSENET_DIR: &str = "project-posenet";

/// Preview the camera briefly; fails when no camera is attached.
const CAMERA_PREVIEW_SCRIPT: &str = "\
from time import sleep
from picamera2 import Picamera2
camera = Picamera2()
camera.configure(camera.create_preview_configuration())
camera.start()
sleep(2)
camera.stop()
";

pub fn unit() -> Unit {
    Unit::new("s1")
        .description("Session 1: camera booth and Coral image classification")
        .interfaces(["camera"])
        .system_packages([
            // fetching the coral apt key
            "curl",
            "wget",
            "git",
            // guizero renders through tkinter
            "python3-tk",
            // from the coral-edgetpu apt source
            "python3-tflite-runtime",
            "libedgetpu1-std",
            "python3-pycoral",
        ])
        .language_packages(["guizero", "pillow"])
        .package_sources(add_coral_apt_source)
        .custom_install(|ctx| {
            install_coral_example(ctx)?;
            install_posenet(ctx)
        })
        .self_tests(self_tests())
        .hardware_tests([Check::new(
            "camera produces a preview",
            CheckKind::PythonScript(CAMERA_PREVIEW_SCRIPT.to_string()),
        )])
}

fn self_tests() -> Vec<Check> {
    let mut checks = vec![
        Check::interface_enabled("camera"),
        Check::can_import("matplotlib"),
        Check::can_import("guizero"),
        Check::can_import("picamera2"),
        Check::dir_exists(CORAL_EXAMPLE_DIR),
    ];
    checks.extend(
        CORAL_SCRIPTS
            .iter()
            .chain(CORAL_ASSETS)
            .map(|file| Check::file_exists(format!("{}/{}", CORAL_EXAMPLE_DIR, file))),
    );
    checks.push(Check::dir_exists(POSENET_DIR));
    checks.push(Check::file_exists(format!("{}/pose_camera.py", POSENET_DIR)));
    checks
}

/// Register the coral-edgetpu apt repository and refresh the package index.
///
/// Follows https://coral.ai/docs/accelerator/get-started
pub fn add_coral_apt_source(ctx: &ProvisionContext<'_>) -> Result<()> {
    let sources_dir = &ctx.config.apt_sources_dir;
    fs::create_dir_all(sources_dir)
        .with_context(|| format!("Failed to create {}", sources_dir.display()))?;
    let list = sources_dir.join(CORAL_APT_LIST);
    fs::write(&list, format!("{}\n", CORAL_APT_SOURCE))
        .with_context(|| format!("Failed to write {}", list.display()))?;
    info!(path = %list.display(), "wrote apt source");

    let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
    let key = temp_dir.path().join("apt-key.gpg");
    download(ctx, CORAL_APT_KEY_URL, &key)?;
    run_tool(ctx.runner, &AptKeyAddArgs { key_file: key })?;
    run_tool(
        ctx.runner,
        &AptUpdateArgs {
            program: ctx.config.system_package_manager.clone(),
        },
    )?;
    Ok(())
}

/// Install the bird classification example into `<root>/coral_example`.
///
/// Based on `python/examples/classification` in google-coral/tflite.
pub fn install_coral_example(ctx: &ProvisionContext<'_>) -> Result<()> {
    info!("starting installing coral test model data + scripts");
    let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
    let staging = temp_dir.path().join(CORAL_EXAMPLE_DIR);
    fs::create_dir_all(&staging)?;

    for asset in CORAL_ASSETS {
        download(ctx, &format!("{}/{}", CORAL_ASSETS_BASE_URL, asset), &staging.join(asset))?;
    }
    for script in CORAL_SCRIPTS {
        download(ctx, &format!("{}/{}", CORAL_SCRIPTS_BASE_URL, script), &staging.join(script))?;
    }

    // students read these from /opt without sudo
    fs_ops::set_tree_modes(&staging, 0o755, 0o644)?;

    let dest = ctx.install_path(CORAL_EXAMPLE_DIR);
    fs_ops::replace_dir(&staging, &dest)?;
    fs_ops::log_dir_contents(&dest);
    info!("finished installing coral test model data + scripts");
    Ok(())
}

/// Install posenet into `<root>/project-posenet`.
pub fn install_posenet(ctx: &ProvisionContext<'_>) -> Result<()> {
    info!("starting installing posenet code");
    let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
    let checkout = clone_into(ctx, POSENET_REPO, temp_dir.path(), POSENET_DIR)?;

    // pulls in the model files pose_camera.py needs
    run_in(ctx, &checkout, "bash", &["install_requirements.sh"])?;

    let dest = ctx.install_path(POSENET_DIR);
    fs_ops::replace_dir(&checkout, &dest)?;
    fs_ops::log_dir_contents(&dest);
    info!("finished installing posenet code");
    Ok(())
}
