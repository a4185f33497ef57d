//! Logic modules: turn a set of selected units into host changes.
//!
//! # Modules
//!
//! - `aggregate`: union of one requirement across units (pure)
//! - `interfaces`: enable hardware interfaces via `raspi-config`
//! - `packages`: batched `apt-get` / `pip` installs
//! - `custom_install`: per-unit install hooks

pub mod aggregate;
pub mod custom_install;
pub mod interfaces;
pub mod packages;
