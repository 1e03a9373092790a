//! Grading runner: probes, then fixed cases, then the report.
//!
//! # Pipeline
//!
//! ```text
//! seed rng → run_probes() → FailureSet
//!   → run_cases(FailureSet) → [LedgerLine × 5]
//!   → GradeReport
//! ```
//!
//! The runner never looks inside a failure. Probes and cases each decide
//! pass or fail behind their own isolation boundary; the runner only
//! sequences them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::cases::run_cases;
use crate::config::GradeConfig;
use crate::contract::SubmissionV1;
use crate::probes::run_probes;
use crate::report::GradeReport;

/// Build the probe RNG: seeded when asked, OS entropy otherwise.
#[must_use]
pub fn probe_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Grade a submission with an explicit RNG.
pub fn run_with_rng<R: Rng + ?Sized>(submission: &dyn SubmissionV1, rng: &mut R) -> GradeReport {
    let failures = run_probes(submission, rng);
    let ledger = run_cases(submission, &failures);
    let report = GradeReport {
        submission_id: submission.submission_id().to_string(),
        source_digest: submission.source_digest().cloned(),
        failures,
        ledger,
    };
    info!(
        submission = %report.submission_id,
        passed = report.passed(),
        total = report.total(),
        vetoed = report.failures.len(),
        "grading run complete"
    );
    report
}

/// Grade a submission under `config`.
pub fn run_with_config(submission: &dyn SubmissionV1, config: &GradeConfig) -> GradeReport {
    run_with_rng(submission, &mut probe_rng(config.seed))
}

/// Grade a submission with default configuration (unseeded).
pub fn run(submission: &dyn SubmissionV1) -> GradeReport {
    run_with_config(submission, &GradeConfig::default())
}
