//! Common utilities for the QuickDOM document core.
//!
//! This crate provides shared infrastructure used by the acquisition and
//! parsing pipeline:
//! - **URL Resolution** - relative-to-absolute reference resolution
//! - **Warning System** - colored terminal output for recoverable failures

pub mod url;
pub mod warning;
