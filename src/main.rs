//! pbl - Main entry point
//!
//! Parses the command line, loads configuration and dispatches to the
//! installer or the self-test runner. Exit status is 1 on any error and on
//! any failed check.

use std::process::ExitCode;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use pbl::cli::{Cli, Commands, Selection};
use pbl::config::ProvisionConfig;
use pbl::error::Result;
use pbl::installer::install_selected;
use pbl::preflight::run_preflight_checks;
use pbl::registry::Registry;
use pbl::self_test::run_suite;
use pbl::unit::{ProvisionContext, Requirement, Suite};
use pbl::SystemRunner;

/// Initialize logging. RUST_LOG wins over `-v`.
fn init_logger(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logger(cli.log_level());
    debug!("CLI arguments parsed");

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            eprintln!("✗ {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load the config file (if any) and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<ProvisionConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from: {:?}", path);
            ProvisionConfig::load_from_file(path)?
        }
        None => ProvisionConfig::default(),
    };
    if let Some(root) = &cli.install_root {
        config.install_root = root.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Returns `Ok(false)` when a test suite ran but had failures.
fn run(cli: Cli) -> Result<bool> {
    let config = load_config(&cli)?;
    let registry = Registry::course();
    let runner = SystemRunner::new(cli.dry_run);
    let ctx = ProvisionContext::new(&runner, &config).with_dry_run(cli.dry_run);

    if cli.dry_run {
        info!("dry-run: destructive commands and install hooks will be skipped");
    }

    match cli.command {
        Commands::Install {
            selection,
            skip_preflight,
        } => {
            if skip_preflight || cli.dry_run {
                debug!("pre-flight checks skipped");
            } else {
                run_preflight_checks(&config)?;
            }
            let summary = install_selected(&ctx, &registry, &selection.units, &selection.exclude)?;
            println!(
                "✓ Installed {} (system packages: {}, language packages: {})",
                summary.units.join(", "),
                summary.system_packages.len(),
                summary.language_packages.len()
            );
            Ok(true)
        }
        Commands::Test { selection } => run_tests(&ctx, &registry, &selection, Suite::SelfTest),
        Commands::Hwtest { selection } => run_tests(&ctx, &registry, &selection, Suite::Hardware),
        Commands::List => {
            print_units(&registry);
            Ok(true)
        }
    }
}

fn run_tests(
    ctx: &ProvisionContext<'_>,
    registry: &Registry,
    selection: &Selection,
    suite: Suite,
) -> Result<bool> {
    let units = registry.select(&selection.units, &selection.exclude)?;
    let report = run_suite(ctx, &units, suite);
    print!("{}", report);
    Ok(report.all_passed())
}

fn print_units(registry: &Registry) {
    let join = |set: &std::collections::BTreeSet<String>| {
        if set.is_empty() {
            "-".to_string()
        } else {
            set.iter().cloned().collect::<Vec<_>>().join(" ")
        }
    };
    for unit in registry.all() {
        println!("{}: {}", unit.name, unit.description);
        println!("  interfaces:        {}", join(unit.requirement(Requirement::Interfaces)));
        println!("  system packages:   {}", join(unit.requirement(Requirement::SystemPackages)));
        println!("  language packages: {}", join(unit.requirement(Requirement::LanguagePackages)));
        println!(
            "  custom install:    {}",
            if unit.custom_install.is_some() { "yes" } else { "no" }
        );
        println!(
            "  checks:            {} self-test, {} hardware",
            unit.self_tests.len(),
            unit.hardware_tests.len()
        );
    }
}
