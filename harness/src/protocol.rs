//! Stdio plugin protocol for out-of-process submissions.
//!
//! # Exchange
//!
//! ```text
//! argv   := <solution> <entry_point>
//! stdin  := {"args": [arg, ...], "entry_point": "<entry_point>"}
//! stdout := table                                   (exit 0)
//! ```
//!
//! Arguments follow the entry point's signature: constructors take one
//! record list, `merge_customer_info` takes two tables, the aggregations take
//! one table. Tables and records use the kernel wire codec.
//!
//! A non-zero exit is a failed call. The exit code says why: see
//! [`EXIT_FAILED`], [`EXIT_PROTOCOL`], [`EXIT_NOT_IMPLEMENTED`].

use std::io::{Read, Write};

use coursegrade_kernel::carrier::table::Table;
use coursegrade_kernel::carrier::wire::{
    decode_records, decode_table, encode_records, encode_table, WireError,
};
use coursegrade_kernel::carrier::value::Value;

use crate::contract::{EntryPoint, SubmissionError, SubmissionV1};

/// The entry point raised an error of its own.
pub const EXIT_FAILED: u8 = 1;
/// The request was malformed or named an unknown entry point.
pub const EXIT_PROTOCOL: u8 = 2;
/// The submission does not implement the requested entry point.
pub const EXIT_NOT_IMPLEMENTED: u8 = 3;

/// Error on either side of the plugin protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The entry point name is not one of the five.
    UnknownEntryPoint { name: String },
    /// The argv entry point and the request entry point disagree.
    EntryPointMismatch { argv: String, request: String },
    /// The request bytes are not a valid request object.
    Malformed { detail: String },
    /// Wrong number of arguments for the entry point.
    Arity {
        entry_point: EntryPoint,
        expected: usize,
        actual: usize,
    },
    /// An argument failed to decode.
    Argument { index: usize, detail: WireError },
    /// The submission returned an error.
    Submission(SubmissionError),
    /// Reading the request or writing the response failed.
    Io { detail: String },
}

impl ProtocolError {
    /// Process exit code reporting this error to the caller.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Submission(SubmissionError::NotImplemented { .. }) => EXIT_NOT_IMPLEMENTED,
            Self::Submission(_) | Self::Io { .. } => EXIT_FAILED,
            Self::UnknownEntryPoint { .. }
            | Self::EntryPointMismatch { .. }
            | Self::Malformed { .. }
            | Self::Arity { .. }
            | Self::Argument { .. } => EXIT_PROTOCOL,
        }
    }
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownEntryPoint { name } => write!(f, "unknown entry point: {name}"),
            Self::EntryPointMismatch { argv, request } => {
                write!(f, "entry point mismatch: argv {argv}, request {request}")
            }
            Self::Malformed { detail } => write!(f, "malformed request: {detail}"),
            Self::Arity {
                entry_point,
                expected,
                actual,
            } => write!(
                f,
                "{entry_point} takes {expected} argument(s), got {actual}"
            ),
            Self::Argument { index, detail } => write!(f, "argument {index}: {detail}"),
            Self::Submission(e) => write!(f, "{e}"),
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// One decoded call.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub entry_point: EntryPoint,
    pub args: Vec<serde_json::Value>,
}

impl Request {
    /// A call to a constructor entry point.
    #[must_use]
    pub fn with_records(entry_point: EntryPoint, records: &[Vec<Value>]) -> Self {
        Self {
            entry_point,
            args: vec![encode_records(records)],
        }
    }

    /// A call to a table-taking entry point.
    #[must_use]
    pub fn with_tables(entry_point: EntryPoint, tables: &[&Table]) -> Self {
        Self {
            entry_point,
            args: tables.iter().map(|t| encode_table(t)).collect(),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "args": self.args,
            "entry_point": self.entry_point.as_str(),
        })
    }

    /// Parse request bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Malformed`] or
    /// [`ProtocolError::UnknownEntryPoint`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let json: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| ProtocolError::Malformed {
                detail: e.to_string(),
            })?;
        let name = json
            .get("entry_point")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| ProtocolError::Malformed {
                detail: "missing \"entry_point\" string".into(),
            })?;
        let entry_point =
            EntryPoint::from_name(name).ok_or_else(|| ProtocolError::UnknownEntryPoint {
                name: name.to_string(),
            })?;
        let args = json
            .get("args")
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| ProtocolError::Malformed {
                detail: "missing \"args\" array".into(),
            })?
            .clone();
        Ok(Self { entry_point, args })
    }
}

fn expect_arity(request: &Request, expected: usize) -> Result<(), ProtocolError> {
    if request.args.len() == expected {
        Ok(())
    } else {
        Err(ProtocolError::Arity {
            entry_point: request.entry_point,
            expected,
            actual: request.args.len(),
        })
    }
}

fn records_arg(request: &Request, index: usize) -> Result<Vec<Vec<Value>>, ProtocolError> {
    decode_records(&request.args[index])
        .map_err(|detail| ProtocolError::Argument { index, detail })
}

fn table_arg(request: &Request, index: usize) -> Result<Table, ProtocolError> {
    decode_table(&request.args[index]).map_err(|detail| ProtocolError::Argument { index, detail })
}

/// Decode the arguments of `request` and call the matching entry point.
///
/// # Errors
///
/// Returns [`ProtocolError`] for arity or decoding problems, or wraps the
/// submission's own error.
pub fn dispatch(submission: &dyn SubmissionV1, request: &Request) -> Result<Table, ProtocolError> {
    let result = match request.entry_point {
        EntryPoint::CreatePurchaseDf => {
            expect_arity(request, 1)?;
            submission.create_purchase_df(&records_arg(request, 0)?)
        }
        EntryPoint::CreateCustomerDf => {
            expect_arity(request, 1)?;
            submission.create_customer_df(&records_arg(request, 0)?)
        }
        EntryPoint::MergeCustomerInfo => {
            expect_arity(request, 2)?;
            submission.merge_customer_info(&table_arg(request, 0)?, &table_arg(request, 1)?)
        }
        EntryPoint::GetRepeatCustomers => {
            expect_arity(request, 1)?;
            submission.get_repeat_customers(&table_arg(request, 0)?)
        }
        EntryPoint::CalculateTotalSpend => {
            expect_arity(request, 1)?;
            submission.calculate_total_spend(&table_arg(request, 0)?)
        }
    };
    result.map_err(ProtocolError::Submission)
}

/// Serve one call: read the request from `input`, write the table to `output`.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the request is invalid, disagrees with
/// `argv_entry_point`, the submission fails, or I/O fails.
pub fn serve(
    submission: &dyn SubmissionV1,
    argv_entry_point: &str,
    mut input: impl Read,
    mut output: impl Write,
) -> Result<(), ProtocolError> {
    if EntryPoint::from_name(argv_entry_point).is_none() {
        return Err(ProtocolError::UnknownEntryPoint {
            name: argv_entry_point.to_string(),
        });
    }
    let mut bytes = Vec::new();
    input
        .read_to_end(&mut bytes)
        .map_err(|e| ProtocolError::Io {
            detail: e.to_string(),
        })?;
    let request = Request::from_slice(&bytes)?;
    if request.entry_point.as_str() != argv_entry_point {
        return Err(ProtocolError::EntryPointMismatch {
            argv: argv_entry_point.to_string(),
            request: request.entry_point.as_str().to_string(),
        });
    }
    let table = dispatch(submission, &request)?;
    let body = serde_json::to_vec(&encode_table(&table)).map_err(|e| ProtocolError::Io {
        detail: e.to_string(),
    })?;
    output
        .write_all(&body)
        .and_then(|()| output.flush())
        .map_err(|e| ProtocolError::Io {
            detail: e.to_string(),
        })
}

/// Plugin-side `main`: serve one call over the process's argv, stdin and stdout.
///
/// Errors go to stderr; the exit code follows [`ProtocolError::exit_code`].
#[must_use]
pub fn serve_stdio(submission: &dyn SubmissionV1) -> std::process::ExitCode {
    let Some(entry_point) = std::env::args().nth(1) else {
        eprintln!("usage: <solution> <entry_point>");
        return std::process::ExitCode::from(EXIT_PROTOCOL);
    };
    match serve(
        submission,
        &entry_point,
        std::io::stdin().lock(),
        std::io::stdout().lock(),
    ) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            std::process::ExitCode::from(e.exit_code())
        }
    }
}
