//! Shared components - errors, configuration, and utilities

pub mod errors;
pub mod utils;
pub mod config;
