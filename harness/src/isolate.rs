//! Probe isolation boundary.
//!
//! Every call into a submission goes through [`guarded`]. Whatever happens
//! inside (an error return, a panic, a table of the wrong shape) comes back
//! out as a [`ProbeFailure`] value. Nothing a submission does can abort the
//! run past this boundary.
//!
//! Panic capture relies on `panic = "unwind"` (set for every profile in the
//! workspace manifest).

use std::panic::{catch_unwind, AssertUnwindSafe};

use coursegrade_kernel::carrier::table::Table;

use crate::contract::{EntryPoint, SubmissionError};

/// Why a probe did not pass.
///
/// Internal only: the ledger shows pass/fail, never this detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    /// The entry point returned an error.
    Submission(SubmissionError),
    /// The entry point panicked.
    Panicked {
        entry_point: EntryPoint,
        detail: String,
    },
    /// The entry point returned a table that failed a structural or value check.
    Check {
        entry_point: EntryPoint,
        detail: String,
    },
    /// The entry point failed its anti-cheat probe earlier in the run.
    Vetoed { entry_point: EntryPoint },
}

impl std::fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Submission(e) => write!(f, "{e}"),
            Self::Panicked {
                entry_point,
                detail,
            } => write!(f, "{entry_point} panicked: {detail}"),
            Self::Check {
                entry_point,
                detail,
            } => write!(f, "{entry_point} check failed: {detail}"),
            Self::Vetoed { entry_point } => {
                write!(f, "{entry_point} failed its anti-cheat probe")
            }
        }
    }
}

/// Call one entry point inside the isolation boundary.
///
/// # Errors
///
/// Returns [`ProbeFailure::Submission`] if the entry point returns an error,
/// or [`ProbeFailure::Panicked`] if it panics.
pub fn guarded(
    entry_point: EntryPoint,
    call: impl FnOnce() -> Result<Table, SubmissionError>,
) -> Result<Table, ProbeFailure> {
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(table)) => Ok(table),
        Ok(Err(e)) => Err(ProbeFailure::Submission(e)),
        Err(payload) => Err(ProbeFailure::Panicked {
            entry_point,
            detail: panic_detail(payload.as_ref()),
        }),
    }
}

/// Fail the probe with `detail` unless `condition` holds.
///
/// # Errors
///
/// Returns [`ProbeFailure::Check`] when `condition` is false.
pub fn ensure(
    condition: bool,
    entry_point: EntryPoint,
    detail: impl FnOnce() -> String,
) -> Result<(), ProbeFailure> {
    if condition {
        Ok(())
    } else {
        Err(ProbeFailure::Check {
            entry_point,
            detail: detail(),
        })
    }
}

fn panic_detail(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
