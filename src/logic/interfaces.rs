//! Hardware-interface configuration
//!
//! Enables every interface the selected units need through
//! `raspi-config nonint`. State is never cached: each interface is read,
//! set, and read again, and the log line reports both reads.
//!
//! # Failure Policy
//!
//! - A failing or unparseable read aborts the whole pass.
//! - A failing `do_<iface>` call is logged, the state is still re-read and
//!   logged from that re-read, and then the failure is returned.
//!
//! Changes may need a reboot before the hardware sees them; that is left to
//! the operator.

use tracing::{info, warn};

use crate::command_runner::{run_tool, Invocation};
use crate::error::{ProvisionError, Result};
use crate::logic::aggregate::aggregate;
use crate::tool_traits::ToolArgs;
use crate::tools::raspi_config::{GetInterfaceArgs, InterfaceState, SetInterfaceArgs};
use crate::unit::{ProvisionContext, Requirement, Unit};

/// Before/after record for one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceChange {
    pub interface: String,
    pub before: InterfaceState,
    pub after: InterfaceState,
}

/// Read one interface's current state.
pub fn read_interface_state(ctx: &ProvisionContext<'_>, interface: &str) -> Result<InterfaceState> {
    let args = GetInterfaceArgs {
        program: ctx.config.interface_tool.clone(),
        interface: interface.to_string(),
    };
    let output = run_tool(ctx.runner, &args)?;

    InterfaceState::from_raspi_output(&output.stdout).ok_or_else(|| {
        ProvisionError::MalformedOutput {
            command: Invocation::from_tool(&args).to_string(),
            output: output.stdout.clone(),
        }
    })
}

/// Enable one interface, returning the before/after states.
pub fn enable_interface(ctx: &ProvisionContext<'_>, interface: &str) -> Result<InterfaceChange> {
    info!(interface, "enabling interface");
    let before = read_interface_state(ctx, interface)?;

    let set = SetInterfaceArgs {
        program: ctx.config.interface_tool.clone(),
        interface: interface.to_string(),
        state: InterfaceState::Enabled,
    };
    let set_result = run_tool(ctx.runner, &set);
    if let Err(e) = &set_result {
        warn!(interface, error = %e, "{} did not succeed", set.program());
    }

    let after = read_interface_state(ctx, interface)?;
    info!(
        interface,
        was_enabled = before.is_enabled(),
        is_enabled = after.is_enabled(),
        "interface configured"
    );

    set_result?;
    Ok(InterfaceChange {
        interface: interface.to_string(),
        before,
        after,
    })
}

/// Enable every interface required by `units`.
pub fn configure_interfaces(ctx: &ProvisionContext<'_>, units: &[&Unit]) -> Result<Vec<InterfaceChange>> {
    let interfaces = aggregate(units.iter().copied(), Requirement::Interfaces);
    interfaces
        .iter()
        .map(|interface| enable_interface(ctx, interface))
        .collect()
}
