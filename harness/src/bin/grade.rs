//! `grade`: grade the submission in the sibling workspace and print the ledger.
//!
//! Usage: `grade [--write-report] [--json-report] [--seed <u64>]`
//!
//! Stdout: five ledger lines. Stderr: diagnostics (filter with
//! `COURSEGRADE_LOG`). Exit 0 after a completed run whatever the score;
//! 1 if the submission cannot be loaded or a requested report cannot be
//! written; 2 on bad arguments (reported by clap).

use std::process::ExitCode;

use clap::Parser;
use tracing::warn;

use coursegrade_harness::cli::CliOptions;
use coursegrade_harness::config::{harness_dir, GradeConfig, WorkspacePaths};
use coursegrade_harness::loader::ProcessSubmission;
use coursegrade_harness::logging::init_tracing;
use coursegrade_harness::report::{write_json_report, write_report};
use coursegrade_harness::runner::run_with_config;

fn main() -> ExitCode {
    // Usage errors exit with status 2 from clap.
    let options = CliOptions::parse();
    init_tracing();

    let config = GradeConfig {
        seed: options.seed,
        ..GradeConfig::default()
    };
    let dir = match harness_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("cannot locate harness directory: {e}");
            return ExitCode::FAILURE;
        }
    };
    let paths = WorkspacePaths::resolve(&dir, &config);

    let submission = match ProcessSubmission::load(&paths.submission) {
        Ok(submission) => submission,
        Err(e) => {
            warn!(error = %e, "submission load failed");
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let report = run_with_config(&submission, &config);
    println!("{}", report.render());

    if options.write_report {
        if let Err(e) = write_report(&paths.report, &report.lines()) {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }
    if options.json_report {
        if let Err(e) = write_json_report(&paths.json_report, &report) {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
