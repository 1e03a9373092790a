//! Binary that grades a built-in submission with a fixed seed and prints the
//! ledger plus the report digest, for cross-process verification.
//!
//! Usage: `grade_fixture <builtin> [seed]`
//! Output: the five ledger lines, then
//!   `passed`=N
//!   `report_digest`=sha256:...

use coursegrade_harness::config::GradeConfig;
use coursegrade_harness::runner::run_with_config;
use coursegrade_harness::submissions::builtin;

fn main() {
    let mut args = std::env::args().skip(1);
    let name = args.next().expect("usage: grade_fixture <builtin> [seed]");
    let seed = args
        .next()
        .map_or(7, |s| s.parse::<u64>().expect("seed must be a u64"));

    let submission = builtin(&name).unwrap_or_else(|| panic!("unknown builtin: {name}"));
    let config = GradeConfig {
        seed: Some(seed),
        ..GradeConfig::default()
    };
    let report = run_with_config(submission.as_ref(), &config);

    println!("{}", report.render());
    println!("passed={}", report.passed());
    println!(
        "report_digest={}",
        report.digest().expect("report canonicalizes")
    );
}
