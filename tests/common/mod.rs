//! Shared test fixtures: a recording `CommandRunner` that imitates the
//! side effects of the tools pbl shells out to.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use pbl::command_runner::{CommandOutput, CommandRunner, Invocation};
use pbl::config::ProvisionConfig;
use pbl::error::Result;

/// Files every fake clone contains, covering what the course units copy out.
pub const CLONED_FILES: &[&str] = &[
    "README.md",
    "ICM20948.py",
    "pose_camera.py",
    "install_requirements.sh",
    "tests/identify.py",
    "tests/calibrate.py",
];

type FailWhen = Box<dyn Fn(&Invocation) -> bool>;

/// Records every invocation and fakes the host:
///
/// - `raspi-config nonint get_<iface>` prints scripted states, then `0`
/// - `git clone <url> <dest>` creates `dest` with `CLONED_FILES`
/// - `curl -o <dest> <url>` writes the URL into `dest`
/// - anything else succeeds silently
#[derive(Default)]
pub struct FakeRunner {
    pub calls: RefCell<Vec<Invocation>>,
    interface_reads: RefCell<HashMap<String, VecDeque<String>>>,
    fail_when: Option<FailWhen>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outputs `get_<interface>` prints, in order.
    pub fn with_interface_reads(self, interface: &str, outputs: &[&str]) -> Self {
        self.interface_reads.borrow_mut().insert(
            interface.to_string(),
            outputs.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    /// Make matching invocations exit with status 1.
    pub fn failing_when(mut self, fail_when: impl Fn(&Invocation) -> bool + 'static) -> Self {
        self.fail_when = Some(Box::new(fail_when));
        self
    }

    /// Every recorded invocation rendered as a command line.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|i| i.to_string()).collect()
    }

    pub fn calls_to(&self, program: &str) -> Vec<Invocation> {
        self.calls
            .borrow()
            .iter()
            .filter(|i| i.program == program)
            .cloned()
            .collect()
    }

    fn fake_side_effects(&self, invocation: &Invocation) -> CommandOutput {
        let args: Vec<&str> = invocation.args.iter().map(String::as_str).collect();
        match (invocation.program.as_str(), args.as_slice()) {
            ("raspi-config", ["nonint", query]) if query.starts_with("get_") => {
                let interface = &query["get_".len()..];
                let output = self
                    .interface_reads
                    .borrow_mut()
                    .get_mut(interface)
                    .and_then(VecDeque::pop_front)
                    .unwrap_or_else(|| "0".to_string());
                CommandOutput::with_stdout(format!("{}\n", output))
            }
            ("git", ["clone", .., dest]) => {
                let dest = Path::new(dest);
                for file in CLONED_FILES {
                    let path = dest.join(file);
                    fs::create_dir_all(path.parent().unwrap()).unwrap();
                    fs::write(&path, format!("{} from {}", file, args[args.len() - 2])).unwrap();
                }
                CommandOutput::ok()
            }
            ("curl", [.., "-o", dest, url]) => {
                fs::write(dest, url).unwrap();
                CommandOutput::ok()
            }
            _ => CommandOutput::ok(),
        }
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(invocation.clone());
        if self.fail_when.as_ref().is_some_and(|f| f(invocation)) {
            return Ok(CommandOutput::failed(1, format!("{} failed", invocation.program)));
        }
        Ok(self.fake_side_effects(invocation))
    }
}

/// A config rooted in temporary directories.
pub fn temp_config(root: &Path) -> ProvisionConfig {
    ProvisionConfig {
        install_root: root.join("opt"),
        apt_sources_dir: root.join("sources.list.d"),
        ..ProvisionConfig::default()
    }
}

/// Every path under `root`, relative, sorted.
pub fn tree(root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    paths.sort();
    paths
}

pub fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
