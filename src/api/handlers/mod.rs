//! API handlers.

mod history;
mod resolve;

pub use history::{daily_handler, probes_handler, summary_handler};
pub use resolve::{healthz_handler, resolve_handler};
