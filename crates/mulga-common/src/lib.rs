//! Common utilities for the mulga markup scanner.
//!
//! This crate provides shared infrastructure used by all scanner components:
//! - **Warning System** - colored terminal output for malformed input

pub mod warning;
