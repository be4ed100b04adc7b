//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (budgets, timeouts, limits)
//! - Library configuration types
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Cli, Command, EnrichmentArgs, HistoryArgs, ResolveArgs, ServeArgs};
pub use constants::*;
pub use types::{Budgets, Config, LogFormat, LogLevel, TimeoutPolicy};
