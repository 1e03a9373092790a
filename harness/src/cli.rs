//! Command-line options for the `grade` binary.

use clap::Parser;

/// Grade the submission in the sibling `student_workspace/` and print the ledger.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "grade", about = "Coursework grading harness")]
pub struct CliOptions {
    /// Also write the ledger to `student_workspace/report.txt`.
    #[arg(long)]
    pub write_report: bool,

    /// Also write the canonical JSON report to `student_workspace/report.json`.
    #[arg(long)]
    pub json_report: bool,

    /// Seed for the anti-cheat identifiers. Unseeded runs draw from OS entropy.
    #[arg(long, value_name = "U64")]
    pub seed: Option<u64>,
}
