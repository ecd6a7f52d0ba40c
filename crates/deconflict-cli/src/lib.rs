//! Deconfliction CLI - input, schedules and reporting around the core checks.
//!
//! The `deconflict` binary wires these together:
//! - config: environment defaults for thresholds and schedule location
//! - input: interactive entry of the primary mission
//! - schedule: JSON mission and schedule files
//! - scenarios: built-in sample traffic
//! - report: text and JSON output
//! - traffic: traffic source precedence and primary selection

pub mod config;
pub mod input;
pub mod report;
pub mod scenarios;
pub mod schedule;
pub mod traffic;

pub use config::Config;
pub use report::{OutputFormat, Report};
pub use scenarios::{Scenario, ScenarioType};
pub use traffic::{select, Selection, TrafficSource};
