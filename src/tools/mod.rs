//! Type-safe external tool argument modules.
//!
//! This module contains structs that implement `ToolArgs` for each external
//! tool pbl drives. Each struct maps Rust fields to the exact CLI flags and
//! environment variables expected by the corresponding program.

pub mod apt;
pub mod fetch;
pub mod git;
pub mod pip;
pub mod raspi_config;
