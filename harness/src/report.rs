//! Result ledger and grade report.
//!
//! The ledger is what the learner sees: one line per fixed case, pass or
//! fail, no diagnostics. The [`GradeReport`] wraps it with the submission
//! identity and the anti-cheat failure set so a run can be archived as
//! canonical JSON and compared byte-for-byte across processes.

use std::path::Path;

use coursegrade_kernel::proof::canon::canonical_json_bytes;
use coursegrade_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::cases::CaseId;
use crate::contract::EntryPoint;
use crate::probes::FailureSet;

/// Outcome of one fixed case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }
}

/// One ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerLine {
    pub case: CaseId,
    pub verdict: Verdict,
    /// Digest of the table the submission returned, for passing cases.
    pub output_digest: Option<ContentHash>,
}

impl LedgerLine {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Pass
    }
}

impl std::fmt::Display for LedgerLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.verdict {
            Verdict::Pass => write!(f, "✅ {}: {}", self.case, self.case.description()),
            Verdict::Fail => write!(f, "❌ {}: {} failed", self.case, self.case.description()),
        }
    }
}

/// Error writing a report file.
#[derive(Debug)]
pub enum ReportWriteError {
    /// The report could not be serialized.
    Canon { detail: String },
    /// The file could not be written.
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl std::fmt::Display for ReportWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Canon { detail } => write!(f, "cannot serialize report: {detail}"),
            Self::Io { path, source } => write!(f, "cannot write {path}: {source}"),
        }
    }
}

impl std::error::Error for ReportWriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Canon { .. } => None,
        }
    }
}

/// Everything one grading run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeReport {
    pub submission_id: String,
    pub source_digest: Option<ContentHash>,
    pub failures: FailureSet,
    pub ledger: Vec<LedgerLine>,
}

impl GradeReport {
    /// Number of passing cases.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.ledger.iter().filter(|l| l.passed()).count()
    }

    /// Number of cases run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.ledger.len()
    }

    /// The ledger as display lines, in case order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.ledger.iter().map(ToString::to_string).collect()
    }

    /// The ledger newline-joined, as printed on stdout.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines().join("\n")
    }

    /// The report as a JSON value (canonicalized by [`Self::to_canonical_json_bytes`]).
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let ledger: Vec<serde_json::Value> = self
            .ledger
            .iter()
            .map(|l| {
                serde_json::json!({
                    "case": l.case.label(),
                    "description": l.case.description(),
                    "output_digest": l.output_digest.as_ref().map(ContentHash::as_str),
                    "verdict": l.verdict.as_str(),
                })
            })
            .collect();
        let failures: Vec<&str> = self.failures.iter().map(EntryPoint::as_str).collect();
        serde_json::json!({
            "failures": failures,
            "ledger": ledger,
            "passed": self.passed(),
            "schema_version": "grade_report.v1",
            "source_digest": self.source_digest.as_ref().map(ContentHash::as_str),
            "submission_id": self.submission_id,
            "total": self.total(),
        })
    }

    /// Canonical JSON bytes of the report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportWriteError::Canon`] if canonicalization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, ReportWriteError> {
        canonical_json_bytes(&self.to_json()).map_err(|e| ReportWriteError::Canon {
            detail: e.to_string(),
        })
    }

    /// Digest of the canonical report bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ReportWriteError::Canon`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, ReportWriteError> {
        Ok(canonical_hash(
            HashDomain::GradeReport,
            &self.to_canonical_json_bytes()?,
        ))
    }
}

/// Write ledger lines to `path`, newline-joined with a trailing newline.
///
/// # Errors
///
/// Returns [`ReportWriteError::Io`] if the file cannot be written.
pub fn write_report<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<(), ReportWriteError> {
    let mut text = lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n");
    text.push('\n');
    std::fs::write(path, text).map_err(|source| ReportWriteError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Write the canonical JSON report to `path`.
///
/// # Errors
///
/// Returns [`ReportWriteError`] if serialization or the write fails.
pub fn write_json_report(path: &Path, report: &GradeReport) -> Result<(), ReportWriteError> {
    let bytes = report.to_canonical_json_bytes()?;
    std::fs::write(path, bytes).map_err(|source| ReportWriteError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(case: CaseId, verdict: Verdict) -> LedgerLine {
        LedgerLine {
            case,
            verdict,
            output_digest: None,
        }
    }

    fn sample() -> GradeReport {
        let mut failures = FailureSet::new();
        failures.mark(EntryPoint::GetRepeatCustomers);
        GradeReport {
            submission_id: "sample".into(),
            source_digest: None,
            failures,
            ledger: vec![
                line(CaseId::Tc1, Verdict::Pass),
                line(CaseId::Tc2, Verdict::Pass),
                line(CaseId::Tc3, Verdict::Pass),
                line(CaseId::Tc4, Verdict::Fail),
                line(CaseId::Tc5, Verdict::Pass),
            ],
        }
    }

    #[test]
    fn ledger_lines_use_fixed_wording() {
        assert_eq!(
            line(CaseId::Tc1, Verdict::Pass).to_string(),
            "✅ TC1: Creating structured purchase DataFrame"
        );
        assert_eq!(
            line(CaseId::Tc4, Verdict::Fail).to_string(),
            "❌ TC4: Identifying repeat buyers failed"
        );
    }

    #[test]
    fn render_joins_without_trailing_newline() {
        let rendered = sample().render();
        assert_eq!(rendered.lines().count(), 5);
        assert!(!rendered.ends_with('\n'));
        assert_eq!(sample().passed(), 4);
    }

    #[test]
    fn json_lists_failures_by_name() {
        let json = sample().to_json();
        assert_eq!(json["failures"], serde_json::json!(["get_repeat_customers"]));
        assert_eq!(json["passed"], 4);
        assert_eq!(json["ledger"][3]["verdict"], "fail");
        assert!(json["source_digest"].is_null());
    }

    #[test]
    fn digest_is_stable() {
        assert_eq!(sample().digest().unwrap(), sample().digest().unwrap());
        let mut other = sample();
        other.ledger[0].verdict = Verdict::Fail;
        assert_ne!(sample().digest().unwrap(), other.digest().unwrap());
    }

    #[test]
    fn write_report_adds_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        write_report(&path, &["✅ TC1: a", "❌ TC2: b failed"]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "✅ TC1: a\n❌ TC2: b failed\n");
    }

    #[test]
    fn write_report_to_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("report.txt");
        let err = write_report(&path, &["x"]).unwrap_err();
        assert!(matches!(err, ReportWriteError::Io { .. }));
    }

    #[test]
    fn json_report_round_trips_through_serde() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_json_report(&path, &sample()).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(parsed, sample().to_json());
    }
}
