//! Coursegrade harness: grades one learner submission of the purchases
//! exercise.
//!
//! A run has two phases. Anti-cheat probes call three entry points on inputs
//! the fixed cases never use and collect a failure set; then five fixed cases
//! run in order, each producing one ledger line, with the failure set vetoing
//! the repeat-buyer and spend cases.
//!
//! The harness does NOT implement table logic; it delegates to the kernel.
//! Submissions provide the five entry points only; the harness owns probing,
//! isolation, and reporting.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cases;
pub mod cli;
pub mod config;
pub mod contract;
pub mod isolate;
pub mod loader;
pub mod logging;
pub mod probes;
pub mod protocol;
pub mod report;
pub mod runner;
pub mod submissions;
