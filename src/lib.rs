pub mod commands;
pub mod config;
pub mod contract;
pub mod error;
pub mod intelligence;
pub mod logging;
pub mod memory;
pub mod orchestrator;
pub mod render;
pub mod runner;

/// Banner title shown at the top of every rendered report
pub const REPORT_TITLE: &str = "VERIPIPE — ENGINEERING VERIFICATION CORE";
