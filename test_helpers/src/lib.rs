//! Test helpers shared across the workspace crates.
//!
//! [`env`] serialises environment-variable mutation behind RAII guards and
//! [`project`] lays out throwaway project trees on disk.

pub mod env;
pub mod project;
