use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// pbl - provision Raspberry Pis for the PortableBalanceLab course
#[derive(Parser, Debug)]
#[command(name = "pbl")]
#[command(about = "Install and verify PortableBalanceLab course requirements on a Raspberry Pi")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file (tool names, install root)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Where downloaded examples and tools are placed (overrides the config file)
    #[arg(long, global = true)]
    pub install_root: Option<PathBuf>,

    /// Dry-run mode: show what would be executed without making changes.
    ///
    /// Package installs, interface changes and custom-install hooks are
    /// logged and skipped. Read-only queries (interface state, import
    /// checks) still run so the preview is realistic.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// More logging (-v debug, -vv trace). RUST_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enable interfaces, install packages and run custom install steps
    Install {
        #[command(flatten)]
        selection: Selection,

        /// Don't check for root and required tools before installing
        #[arg(long)]
        skip_preflight: bool,
    },
    /// Run the software self-tests
    Test {
        #[command(flatten)]
        selection: Selection,
    },
    /// Run the hardware tests (needs the course hardware attached)
    Hwtest {
        #[command(flatten)]
        selection: Selection,
    },
    /// List units and what they require
    List,
}

/// Which units a command acts on.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Units to act on (default: all)
    pub units: Vec<String>,

    /// Units to leave out
    #[arg(short, long, value_name = "UNIT", num_args = 1..)]
    pub exclude: Vec<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }

    /// Default log filter for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
