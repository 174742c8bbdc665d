//! Adapters for external dependencies.

pub mod memory;
