//! Unit registry
//!
//! An explicit table of every known unit, built once at startup and passed
//! to the installer and the test runner. Selection by name happens here and
//! fails fast, listing the valid names, before anything touches the host.

use std::collections::BTreeMap;

use crate::error::{ProvisionError, Result};
use crate::unit::Unit;
use crate::units;

/// Name → unit table.
#[derive(Debug, Default)]
pub struct Registry {
    units: BTreeMap<String, Unit>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The PortableBalanceLab course: common, L2, L3, S1-S4.
    pub fn course() -> Self {
        let mut registry = Self::new();
        registry.register(units::common::unit());
        registry.register(units::l2::unit());
        registry.register(units::l3::unit());
        registry.register(units::s1::unit());
        registry.register(units::s2::unit());
        registry.register(units::s3::unit());
        registry.register(units::s4::unit());
        registry
    }

    /// Add a unit, replacing any unit with the same name.
    pub fn register(&mut self, unit: Unit) {
        self.units.insert(unit.name.clone(), unit);
    }

    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.units.get(name)
    }

    /// Every unit, ordered by name.
    pub fn all(&self) -> Vec<&Unit> {
        self.units.values().collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.units.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Resolve an installation request to a concrete unit list.
    ///
    /// An empty `include` means every unit. `exclude` is then removed from
    /// that set. Names in either list must be registered.
    pub fn select(&self, include: &[String], exclude: &[String]) -> Result<Vec<&Unit>> {
        for name in include.iter().chain(exclude) {
            self.lookup(name)?;
        }

        let selected: Vec<&Unit> = if include.is_empty() {
            self.all()
        } else {
            let mut picked: Vec<&Unit> = Vec::new();
            for name in include {
                let unit = self.lookup(name)?;
                if !picked.iter().any(|u| u.name == unit.name) {
                    picked.push(unit);
                }
            }
            picked
        };

        Ok(selected
            .into_iter()
            .filter(|unit| !exclude.contains(&unit.name))
            .collect())
    }

    fn lookup(&self, name: &str) -> Result<&Unit> {
        self.get(name).ok_or_else(|| ProvisionError::UnknownUnit {
            name: name.to_string(),
            valid: self.names().join(", "),
        })
    }
}
