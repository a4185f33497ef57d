//! Requirement aggregation
//!
//! Unions one declared requirement set across the selected units.
//!
//! # Design
//!
//! - **Union semantics**: a name required by any selected unit is required
//! - **Order-independent**: output is a `BTreeSet`, sorted and deduplicated
//! - **Pure logic**: no I/O, never fails; undeclared sets count as empty

use std::collections::BTreeSet;

use crate::unit::{Requirement, Unit};

/// Union of `requirement` across `units`.
pub fn aggregate<'u, I>(units: I, requirement: Requirement) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'u Unit>,
{
    units
        .into_iter()
        .flat_map(|unit| unit.requirement(requirement).iter().cloned())
        .collect()
}
