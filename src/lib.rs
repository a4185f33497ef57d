//! pbl library
//!
//! Provisioning for the PortableBalanceLab course: each course unit
//! declares the hardware interfaces, OS packages and Python packages it
//! needs plus any custom install steps, and the installer applies the union
//! of those requirements to a Raspberry Pi. Self-tests confirm the result.

pub mod cli;
pub mod command_runner;
pub mod config;
pub mod error;
pub mod fs_ops;
pub mod installer;
pub mod logic;
pub mod preflight;
pub mod registry;
pub mod self_test;
pub mod tool_traits;
pub mod tools;
pub mod unit;
pub mod units;

// Re-export main types for convenience
pub use command_runner::{CommandOutput, CommandRunner, Invocation, SystemRunner};
pub use config::ProvisionConfig;
pub use error::{ProvisionError, Result};
pub use installer::{install, install_selected, InstallStage, InstallSummary};
pub use logic::aggregate::aggregate;
pub use registry::Registry;
pub use self_test::{run_suite, CheckOutcome, CheckResult, TestReport};
pub use unit::{Check, CheckKind, ProvisionContext, Requirement, Suite, Unit};
