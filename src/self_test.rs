//! Self-test runner
//!
//! Evaluates the checks declared by the selected units and reports every
//! outcome. Checks are independent: a failing check is recorded and the
//! run moves on, so one report shows everything that is wrong with a Pi.
//!
//! # Failure Policy
//!
//! Nothing here returns an error. A check that cannot even be evaluated
//! (the interpreter is missing, `raspi-config` prints garbage) is a failed
//! check with the error as its reason.

use std::fmt;
use std::path::Path;

use tracing::{error, info};

use crate::command_runner::{run_checked, Invocation};
use crate::logic::interfaces::read_interface_state;
use crate::unit::{Check, CheckKind, ProvisionContext, Suite, Unit};

/// Result of evaluating one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Pass,
    Fail(String),
}

impl CheckOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, CheckOutcome::Pass)
    }
}

/// One evaluated check, attributed to the unit that declared it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub unit: String,
    pub check: String,
    pub outcome: CheckOutcome,
}

/// Everything a suite run produced, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestReport {
    pub suite: Option<Suite>,
    pub results: Vec<CheckResult>,
}

impl TestReport {
    /// True when no check failed. An empty report passes.
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.outcome.is_pass())
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_pass()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.outcome.is_pass())
    }
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suite = self.suite.map(|s| s.to_string()).unwrap_or_default();
        writeln!(
            f,
            "{}: {} passed, {} failed ({} checks)",
            suite,
            self.passed(),
            self.failed(),
            self.results.len()
        )?;
        for result in self.failures() {
            if let CheckOutcome::Fail(reason) = &result.outcome {
                writeln!(f, "  FAIL [{}] {}: {}", result.unit, result.check, reason)?;
            }
        }
        Ok(())
    }
}

/// Run the `suite` checks of every unit in `units`.
pub fn run_suite(ctx: &ProvisionContext<'_>, units: &[&Unit], suite: Suite) -> TestReport {
    info!("----- starting {} -----", suite);
    let mut report = TestReport {
        suite: Some(suite),
        results: Vec::new(),
    };

    for &unit in units {
        for check in unit.checks(suite) {
            let outcome = evaluate(ctx, check);
            match &outcome {
                CheckOutcome::Pass => info!(unit = %unit.name, "PASS {}", check.name),
                CheckOutcome::Fail(reason) => {
                    error!(unit = %unit.name, reason = %reason, "FAIL {}", check.name)
                }
            }
            report.results.push(CheckResult {
                unit: unit.name.clone(),
                check: check.name.clone(),
                outcome,
            });
        }
    }

    info!(
        passed = report.passed(),
        failed = report.failed(),
        "----- finished {} -----",
        suite
    );
    report
}

/// Evaluate a single check.
pub fn evaluate(ctx: &ProvisionContext<'_>, check: &Check) -> CheckOutcome {
    match &check.kind {
        CheckKind::InterfaceEnabled(interface) => match read_interface_state(ctx, interface) {
            Ok(state) if state.is_enabled() => CheckOutcome::Pass,
            Ok(state) => CheckOutcome::Fail(format!("{} is {}", interface, state)),
            Err(e) => CheckOutcome::Fail(e.to_string()),
        },
        CheckKind::PythonImport(module) => python(ctx, &format!("import {}", module)),
        CheckKind::PythonAttr { module, attr } => python(
            ctx,
            &format!("import {m}\nassert hasattr({m}, '{a}'), 'missing {a}'", m = module, a = attr),
        ),
        CheckKind::PythonScript(script) => python(ctx, script),
        CheckKind::OnPath(program) => match which::which(program) {
            Ok(_) => CheckOutcome::Pass,
            Err(_) => CheckOutcome::Fail(format!("{} not found on PATH", program)),
        },
        CheckKind::FileExists(path) => {
            let path = ctx.install_path(path);
            exists(&path, path.is_file(), "file")
        }
        CheckKind::DirExists(path) => {
            let path = ctx.install_path(path);
            exists(&path, path.is_dir(), "directory")
        }
        CheckKind::CommandSucceeds { program, args } => {
            command(ctx, &Invocation::new(program.clone()).args(args.iter().cloned()))
        }
    }
}

fn python(ctx: &ProvisionContext<'_>, snippet: &str) -> CheckOutcome {
    command(
        ctx,
        &Invocation::new(ctx.config.python.clone()).args(["-c", snippet]),
    )
}

/// Checks never change the host, so they run even in dry-run mode.
fn command(ctx: &ProvisionContext<'_>, invocation: &Invocation) -> CheckOutcome {
    let invocation = invocation.clone().query();
    match run_checked(ctx.runner, &invocation) {
        Ok(_) => CheckOutcome::Pass,
        Err(e) => CheckOutcome::Fail(e.to_string()),
    }
}

fn exists(path: &Path, present: bool, what: &str) -> CheckOutcome {
    if present {
        CheckOutcome::Pass
    } else {
        CheckOutcome::Fail(format!("{} {} does not exist", what, path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_runner::{CommandOutput, CommandRunner};
    use crate::config::ProvisionConfig;
    use crate::error::Result;
    use std::cell::RefCell;

    /// Fails any invocation whose arguments mention `fail_on`.
    struct ScriptedRunner {
        fail_on: &'static str,
        stdout: &'static str,
        seen: RefCell<Vec<Invocation>>,
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
            self.seen.borrow_mut().push(invocation.clone());
            if invocation.args.iter().any(|a| a.contains(self.fail_on)) {
                Ok(CommandOutput::failed(1, "ModuleNotFoundError"))
            } else {
                Ok(CommandOutput::with_stdout(self.stdout))
            }
        }
    }

    fn runner(fail_on: &'static str) -> ScriptedRunner {
        ScriptedRunner {
            fail_on,
            stdout: "0\n",
            seen: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn test_failing_check_does_not_stop_the_rest() {
        let config = ProvisionConfig::default();
        let runner = runner("guizero");
        let ctx = ProvisionContext::new(&runner, &config);
        let unit = Unit::new("l3").self_tests([
            Check::can_import("guizero"),
            Check::can_import("gpiozero"),
        ]);

        let report = run_suite(&ctx, &[&unit], Suite::SelfTest);

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.all_passed());
        assert_eq!(report.results[0].check, "can import guizero");
        assert!(!report.results[0].outcome.is_pass());
    }

    #[test]
    fn test_empty_suite_passes() {
        let config = ProvisionConfig::default();
        let runner = runner("never");
        let ctx = ProvisionContext::new(&runner, &config);
        let unit = Unit::new("l2");

        let report = run_suite(&ctx, &[&unit], Suite::Hardware);
        assert!(report.results.is_empty());
        assert!(report.all_passed());
        assert!(runner.seen.borrow().is_empty());
    }

    #[test]
    fn test_python_checks_use_configured_interpreter_as_queries() {
        let config = ProvisionConfig {
            python: "python3.11".to_string(),
            ..ProvisionConfig::default()
        };
        let runner = runner("never");
        let ctx = ProvisionContext::new(&runner, &config);

        assert!(evaluate(&ctx, &Check::module_has_attr("hx711_multi", "HX711")).is_pass());

        let seen = runner.seen.borrow();
        assert_eq!(seen[0].program, "python3.11");
        assert_eq!(seen[0].args[0], "-c");
        assert!(seen[0].args[1].contains("hasattr(hx711_multi, 'HX711')"));
        assert!(!seen[0].destructive);
    }

    #[test]
    fn test_interface_check_reads_state() {
        let config = ProvisionConfig::default();
        let mut runner = runner("never");
        let ctx = ProvisionContext::new(&runner, &config);
        assert!(evaluate(&ctx, &Check::interface_enabled("camera")).is_pass());

        runner.stdout = "1\n";
        let ctx = ProvisionContext::new(&runner, &config);
        assert_eq!(
            evaluate(&ctx, &Check::interface_enabled("camera")),
            CheckOutcome::Fail("camera is disabled".to_string())
        );
    }

    #[test]
    fn test_malformed_interface_output_is_a_failure() {
        let config = ProvisionConfig::default();
        let mut runner = runner("never");
        runner.stdout = "maybe\n";
        let ctx = ProvisionContext::new(&runner, &config);
        assert!(!evaluate(&ctx, &Check::interface_enabled("i2c")).is_pass());
    }

    #[test]
    fn test_paths_resolve_under_install_root() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("hx711-multi/tests")).unwrap();
        std::fs::write(tmp.path().join("hx711-multi/tests/identify.py"), "").unwrap();
        let config = ProvisionConfig {
            install_root: tmp.path().to_path_buf(),
            ..ProvisionConfig::default()
        };
        let runner = runner("never");
        let ctx = ProvisionContext::new(&runner, &config);

        assert!(evaluate(&ctx, &Check::dir_exists("hx711-multi")).is_pass());
        assert!(evaluate(&ctx, &Check::file_exists("hx711-multi/tests/identify.py")).is_pass());
        assert!(!evaluate(&ctx, &Check::file_exists("hx711-multi/tests/calibrate.py")).is_pass());
        // a directory is not a file
        assert!(!evaluate(&ctx, &Check::file_exists("hx711-multi")).is_pass());
    }

    #[test]
    fn test_on_path() {
        let config = ProvisionConfig::default();
        let runner = runner("never");
        let ctx = ProvisionContext::new(&runner, &config);
        assert!(evaluate(&ctx, &Check::on_path("sh")).is_pass());
        assert!(!evaluate(&ctx, &Check::on_path("this_binary_definitely_does_not_exist_12345")).is_pass());
    }

    #[test]
    fn test_report_display_lists_failures() {
        let report = TestReport {
            suite: Some(Suite::SelfTest),
            results: vec![
                CheckResult {
                    unit: "s2".into(),
                    check: "can import smbus".into(),
                    outcome: CheckOutcome::Pass,
                },
                CheckResult {
                    unit: "s2".into(),
                    check: "ICM20948.py is installed".into(),
                    outcome: CheckOutcome::Fail("missing".into()),
                },
            ],
        };
        let text = report.to_string();
        assert!(text.starts_with("test: 1 passed, 1 failed (2 checks)"));
        assert!(text.contains("FAIL [s2] ICM20948.py is installed: missing"));
    }
}
