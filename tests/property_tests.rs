//! Property-Based Tests for pbl
//!
//! These tests verify:
//! - Requirement aggregation is order-independent and idempotent
//! - Selection never returns an excluded unit or a duplicate

use proptest::prelude::*;
use std::collections::BTreeSet;

use pbl::logic::aggregate::aggregate;
use pbl::registry::Registry;
use pbl::unit::{Requirement, Unit};

// =============================================================================
// Aggregation
// =============================================================================

fn package_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,8}"
}

fn unit_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(package_name(), 0..6), 0..6)
}

fn build_units(package_lists: &[Vec<String>]) -> Vec<Unit> {
    package_lists
        .iter()
        .enumerate()
        .map(|(i, packages)| {
            Unit::new(format!("u{}", i)).system_packages(packages.iter().map(String::as_str))
        })
        .collect()
}

proptest! {
    /// Reversing unit order doesn't change the union
    #[test]
    fn aggregate_is_order_independent(lists in unit_strategy()) {
        let units = build_units(&lists);
        let forward = aggregate(units.iter(), Requirement::SystemPackages);
        let backward = aggregate(units.iter().rev(), Requirement::SystemPackages);
        prop_assert_eq!(forward, backward);
    }

    /// Listing every unit twice changes nothing
    #[test]
    fn aggregate_is_idempotent(lists in unit_strategy()) {
        let units = build_units(&lists);
        let once = aggregate(units.iter(), Requirement::SystemPackages);
        let twice = aggregate(units.iter().chain(units.iter()), Requirement::SystemPackages);
        prop_assert_eq!(once, twice);
    }

    /// The union is exactly the declared names
    #[test]
    fn aggregate_is_the_union(lists in unit_strategy()) {
        let units = build_units(&lists);
        let expected: BTreeSet<String> = lists.iter().flatten().cloned().collect();
        prop_assert_eq!(aggregate(units.iter(), Requirement::SystemPackages), expected);
        prop_assert!(aggregate(units.iter(), Requirement::Interfaces).is_empty());
    }
}

// =============================================================================
// Selection
// =============================================================================

const COURSE: &[&str] = &["common", "l2", "l3", "s1", "s2", "s3", "s4"];

fn names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(COURSE).prop_map(str::to_string), 0..8)
}

proptest! {
    #[test]
    fn select_honors_exclusions(include in names_strategy(), exclude in names_strategy()) {
        let registry = Registry::course();
        let selected = registry.select(&include, &exclude).unwrap();

        let names: Vec<&str> = selected.iter().map(|u| u.name.as_str()).collect();
        let unique: BTreeSet<&str> = names.iter().copied().collect();
        prop_assert_eq!(unique.len(), names.len());
        for name in &names {
            prop_assert!(!exclude.iter().any(|e| e == name));
            prop_assert!(include.is_empty() || include.iter().any(|i| i == name));
        }
    }
}
