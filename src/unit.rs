//! Course unit descriptors.
//!
//! A `Unit` is one course component (the common base, a lecture, a lab
//! session). It declares what it needs from the host: hardware interfaces,
//! OS packages and Python packages. It may also carry install hooks for
//! work a package manager can't do, and checks that confirm the host is
//! ready for it.
//!
//! Every optional part defaults to empty/absent, and absence is never an
//! error: a unit that declares no OS packages contributes nothing to the
//! batched `apt-get` call, a unit with no custom-install hook is skipped.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use strum::{Display, EnumIter, EnumString};

use crate::command_runner::CommandRunner;
use crate::config::ProvisionConfig;

/// Everything a hook or check needs to touch the host.
pub struct ProvisionContext<'a> {
    /// Executes external tools.
    pub runner: &'a dyn CommandRunner,
    /// Tool names and install root.
    pub config: &'a ProvisionConfig,
    /// Log hooks instead of running them.
    pub dry_run: bool,
}

impl<'a> ProvisionContext<'a> {
    pub fn new(runner: &'a dyn CommandRunner, config: &'a ProvisionConfig) -> Self {
        Self {
            runner,
            config,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn install_root(&self) -> &Path {
        &self.config.install_root
    }

    /// Resolve a path relative to the install root. Absolute paths are
    /// returned unchanged.
    pub fn install_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.config.install_root.join(relative)
    }
}

/// An install step supplied by a unit.
pub type Hook = Box<dyn Fn(&ProvisionContext<'_>) -> anyhow::Result<()>>;

/// Which declared set to read from a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Requirement {
    /// Hardware interfaces toggled through `raspi-config`.
    Interfaces,
    /// OS packages installed through the system package manager.
    SystemPackages,
    /// Python packages installed through pip.
    LanguagePackages,
}

/// Which check collection to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Suite {
    /// Software checks: packages, imports, installed files.
    #[strum(serialize = "test")]
    SelfTest,
    /// Checks that exercise attached hardware.
    #[strum(serialize = "hwtest")]
    Hardware,
}

// ============================================================================
// Checks
// ============================================================================

/// What a check verifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckKind {
    /// `raspi-config nonint get_<iface>` reports enabled.
    InterfaceEnabled(String),
    /// `python3 -c "import <module>"` succeeds.
    PythonImport(String),
    /// The module imports and exposes `attr`.
    PythonAttr { module: String, attr: String },
    /// An executable is on `PATH`.
    OnPath(String),
    /// A regular file exists (relative paths resolve under the install root).
    FileExists(PathBuf),
    /// A directory exists (relative paths resolve under the install root).
    DirExists(PathBuf),
    /// `python3 -c <script>` exits with status 0.
    PythonScript(String),
    /// A command exits with status 0.
    CommandSucceeds { program: String, args: Vec<String> },
}

/// A named verification declared by a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub name: String,
    pub kind: CheckKind,
}

impl Check {
    pub fn new(name: impl Into<String>, kind: CheckKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn interface_enabled(interface: &str) -> Self {
        Self::new(
            format!("{} interface is enabled", interface),
            CheckKind::InterfaceEnabled(interface.to_string()),
        )
    }

    pub fn can_import(module: &str) -> Self {
        Self::new(
            format!("can import {}", module),
            CheckKind::PythonImport(module.to_string()),
        )
    }

    pub fn module_has_attr(module: &str, attr: &str) -> Self {
        Self::new(
            format!("{}.{} is available", module, attr),
            CheckKind::PythonAttr {
                module: module.to_string(),
                attr: attr.to_string(),
            },
        )
    }

    pub fn on_path(program: &str) -> Self {
        Self::new(
            format!("{} available on command line", program),
            CheckKind::OnPath(program.to_string()),
        )
    }

    pub fn file_exists(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::new(
            format!("{} is installed", path.display()),
            CheckKind::FileExists(path),
        )
    }

    pub fn dir_exists(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::new(
            format!("{}/ is installed", path.display()),
            CheckKind::DirExists(path),
        )
    }
}

// ============================================================================
// Unit
// ============================================================================

/// One course component.
pub struct Unit {
    pub name: String,
    pub description: String,
    pub required_interfaces: BTreeSet<String>,
    pub required_system_packages: BTreeSet<String>,
    pub required_language_packages: BTreeSet<String>,
    /// Runs before system packages are installed (e.g. adding apt sources).
    pub package_sources: Option<Hook>,
    /// Runs after all packages are installed.
    pub custom_install: Option<Hook>,
    pub self_tests: Vec<Check>,
    pub hardware_tests: Vec<Check>,
}

impl Unit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            required_interfaces: BTreeSet::new(),
            required_system_packages: BTreeSet::new(),
            required_language_packages: BTreeSet::new(),
            package_sources: None,
            custom_install: None,
            self_tests: Vec::new(),
            hardware_tests: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn interfaces<'s>(mut self, names: impl IntoIterator<Item = &'s str>) -> Self {
        self.required_interfaces
            .extend(names.into_iter().map(str::to_string));
        self
    }

    pub fn system_packages<'s>(mut self, names: impl IntoIterator<Item = &'s str>) -> Self {
        self.required_system_packages
            .extend(names.into_iter().map(str::to_string));
        self
    }

    pub fn language_packages<'s>(mut self, names: impl IntoIterator<Item = &'s str>) -> Self {
        self.required_language_packages
            .extend(names.into_iter().map(str::to_string));
        self
    }

    pub fn package_sources<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ProvisionContext<'_>) -> anyhow::Result<()> + 'static,
    {
        self.package_sources = Some(Box::new(hook));
        self
    }

    pub fn custom_install<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ProvisionContext<'_>) -> anyhow::Result<()> + 'static,
    {
        self.custom_install = Some(Box::new(hook));
        self
    }

    pub fn self_tests(mut self, checks: impl IntoIterator<Item = Check>) -> Self {
        self.self_tests.extend(checks);
        self
    }

    pub fn hardware_tests(mut self, checks: impl IntoIterator<Item = Check>) -> Self {
        self.hardware_tests.extend(checks);
        self
    }

    /// The declared set for `requirement` (empty when undeclared).
    pub fn requirement(&self, requirement: Requirement) -> &BTreeSet<String> {
        match requirement {
            Requirement::Interfaces => &self.required_interfaces,
            Requirement::SystemPackages => &self.required_system_packages,
            Requirement::LanguagePackages => &self.required_language_packages,
        }
    }

    /// The declared checks for `suite` (empty when undeclared).
    pub fn checks(&self, suite: Suite) -> &[Check] {
        match suite {
            Suite::SelfTest => &self.self_tests,
            Suite::Hardware => &self.hardware_tests,
        }
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("name", &self.name)
            .field("required_interfaces", &self.required_interfaces)
            .field("required_system_packages", &self.required_system_packages)
            .field("required_language_packages", &self.required_language_packages)
            .field("package_sources", &self.package_sources.is_some())
            .field("custom_install", &self.custom_install.is_some())
            .field("self_tests", &self.self_tests.len())
            .field("hardware_tests", &self.hardware_tests.len())
            .finish()
    }
}
