//! Integration tests for the verification pipeline
//!
//! Fixture projects use small `sh` scripts as verification tools, so these
//! tests only run on Unix.

#[cfg(unix)]
pub mod cli;
#[cfg(unix)]
pub mod helpers;
#[cfg(unix)]
pub mod pipeline_flow;
