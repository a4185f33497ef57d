//! Pre-flight checks for the install command
//!
//! Verifies the host before anything is changed:
//! - The configured tools (package managers, interface tool) and the
//!   binaries custom installs shell out to are on `PATH`
//! - Running with root privileges (EUID 0)
//!
//! Every problem is collected so the operator sees them all at once.

use tracing::{debug, info, warn};

use crate::config::ProvisionConfig;
use crate::error::{ProvisionError, Result};

/// Binaries the custom-install steps call directly.
const REQUIRED_BINARIES: &[&str] = &[
    "git",  // repository clones
    "curl", // asset downloads
];

/// Result of environment verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightReport {
    pub missing_binaries: Vec<String>,
    pub is_root: bool,
}

impl PreflightReport {
    /// Returns true if all checks passed
    pub fn is_ok(&self) -> bool {
        self.missing_binaries.is_empty() && self.is_root
    }

    /// Convert into a `Preflight` error naming every problem.
    pub fn into_result(self) -> Result<()> {
        if self.is_ok() {
            return Ok(());
        }
        let mut problems = Vec::new();
        if !self.is_root {
            problems.push("must run as root (try: sudo pbl install)".to_string());
        }
        if !self.missing_binaries.is_empty() {
            problems.push(format!(
                "missing required binaries: {}",
                self.missing_binaries.join(", ")
            ));
        }
        Err(ProvisionError::preflight(problems.join("; ")))
    }
}

/// Every binary an install run needs, configured tools first.
pub fn required_binaries(config: &ProvisionConfig) -> Vec<String> {
    let mut binaries = vec![
        config.system_package_manager.clone(),
        config.language_package_manager.clone(),
        config.interface_tool.clone(),
    ];
    for binary in REQUIRED_BINARIES {
        if !binaries.iter().any(|b| b == binary) {
            binaries.push((*binary).to_string());
        }
    }
    binaries
}

fn binary_exists(name: &str) -> bool {
    which::which(name).is_ok()
}

fn is_running_as_root() -> bool {
    nix::unistd::geteuid().is_root()
}

/// Set PBL_SKIP_ROOT_CHECK=1 to skip the root check (development only)
pub fn should_skip_root_check() -> bool {
    std::env::var("PBL_SKIP_ROOT_CHECK")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false)
}

/// Inspect the environment without failing.
pub fn verify_environment(config: &ProvisionConfig) -> PreflightReport {
    let missing_binaries = required_binaries(config)
        .into_iter()
        .filter(|b| !binary_exists(b))
        .collect();

    PreflightReport {
        missing_binaries,
        is_root: is_running_as_root(),
    }
}

/// Verify the environment, returning `Preflight` on any problem.
pub fn run_preflight_checks(config: &ProvisionConfig) -> Result<()> {
    debug!("running pre-flight checks");
    let mut report = verify_environment(config);

    if should_skip_root_check() {
        warn!("root check skipped (PBL_SKIP_ROOT_CHECK=1)");
        report.is_root = true;
    }

    report.into_result()?;
    info!("pre-flight checks passed");
    Ok(())
}
