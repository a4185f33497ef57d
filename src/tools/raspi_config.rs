//! Type-safe arguments for `raspi-config nonint`.
//!
//! # Polarity
//!
//! `raspi-config` uses shell-style truthiness for interfaces: `0` means
//! enabled and `1` means disabled. The same convention applies to what
//! `get_<iface>` prints and to what `do_<iface>` accepts. `InterfaceState`
//! is the only place that converts between the two, in both directions.

use std::fmt;

use crate::tool_traits::ToolArgs;

/// On/off state of one hardware interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceState {
    Enabled,
    Disabled,
}

impl InterfaceState {
    /// Parse the trimmed output of `get_<iface>`.
    pub fn from_raspi_output(output: &str) -> Option<Self> {
        match output.trim() {
            "0" => Some(Self::Enabled),
            "1" => Some(Self::Disabled),
            _ => None,
        }
    }

    /// The argument `do_<iface>` expects for this state.
    pub fn as_raspi_arg(self) -> &'static str {
        match self {
            Self::Enabled => "0",
            Self::Disabled => "1",
        }
    }

    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl fmt::Display for InterfaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => write!(f, "enabled"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

// ============================================================================
// Query
// ============================================================================

/// `raspi-config nonint get_<interface>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetInterfaceArgs {
    pub program: String,
    pub interface: String,
}

impl ToolArgs for GetInterfaceArgs {
    fn program(&self) -> &str {
        &self.program
    }

    fn to_cli_args(&self) -> Vec<String> {
        vec!["nonint".to_string(), format!("get_{}", self.interface)]
    }

    fn is_destructive(&self) -> bool {
        false
    }

    fn captures_output(&self) -> bool {
        true
    }
}

// ============================================================================
// Set
// ============================================================================

/// `raspi-config nonint do_<interface> <0|1>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetInterfaceArgs {
    pub program: String,
    pub interface: String,
    pub state: InterfaceState,
}

impl ToolArgs for SetInterfaceArgs {
    fn program(&self) -> &str {
        &self.program
    }

    fn to_cli_args(&self) -> Vec<String> {
        vec![
            "nonint".to_string(),
            format!("do_{}", self.interface),
            self.state.as_raspi_arg().to_string(),
        ]
    }

    fn captures_output(&self) -> bool {
        true
    }
}
