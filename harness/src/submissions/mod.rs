//! Built-in submissions.
//!
//! Each one implements [`SubmissionV1`](crate::contract::SubmissionV1)
//! in-process. They exist to exercise the grader: a correct solution, a
//! solution that memorized the fixed answers, an empty one, and a buggy one.

pub mod faulty;
pub mod hardcoded;
pub mod reference;
pub mod stub;

use crate::contract::SubmissionV1;

/// Look up a built-in submission by its `submission_id`.
#[must_use]
pub fn builtin(name: &str) -> Option<Box<dyn SubmissionV1>> {
    match name {
        "reference" => Some(Box::new(reference::Reference)),
        "hardcoded" => Some(Box::new(hardcoded::Hardcoded)),
        "stub" => Some(Box::new(stub::Stub)),
        "faulty" => Some(Box::new(faulty::Faulty)),
        _ => None,
    }
}

/// Names accepted by [`builtin`].
pub const BUILTIN_NAMES: [&str; 4] = ["reference", "hardcoded", "stub", "faulty"];
