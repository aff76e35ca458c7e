//! CLI command implementations
//!
//! Each command exposes an `execute` function. Commands that decide the
//! process exit status return `Ok(true)` for success.

pub mod common;
pub mod inspect;
pub mod render;
pub mod run;
pub mod self_check;
pub mod status;
pub mod topology;
