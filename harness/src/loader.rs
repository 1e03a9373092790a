//! Out-of-process submission loader.
//!
//! A submission on disk is an executable speaking the stdio protocol of
//! [`crate::protocol`]. Loading reads it once (for the source digest); every
//! entry-point call then spawns a fresh child process, so one call cannot
//! leave state behind for the next.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use coursegrade_kernel::carrier::table::Table;
use coursegrade_kernel::carrier::wire::table_from_slice;
use coursegrade_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::contract::{EntryPoint, Record, SubmissionError, SubmissionV1};
use crate::protocol::{Request, EXIT_NOT_IMPLEMENTED};

/// Longest stderr excerpt kept in a [`SubmissionError`].
const STDERR_EXCERPT_BYTES: usize = 512;

/// The submission could not be loaded. Aborts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Nothing exists at the path.
    Missing { path: String },
    /// The path exists but is not a regular file.
    NotAFile { path: String },
    /// The file exists but could not be read.
    Unreadable { path: String, detail: String },
    /// The file has no execute permission bit set.
    NotExecutable { path: String },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing { path } => write!(f, "submission not found: {path}"),
            Self::NotAFile { path } => write!(f, "submission is not a file: {path}"),
            Self::Unreadable { path, detail } => {
                write!(f, "cannot read submission {path}: {detail}")
            }
            Self::NotExecutable { path } => write!(f, "submission is not executable: {path}"),
        }
    }
}

impl std::error::Error for LoadError {}

/// A submission executable loaded from disk.
#[derive(Debug, Clone)]
pub struct ProcessSubmission {
    id: String,
    path: PathBuf,
    source_digest: ContentHash,
}

impl ProcessSubmission {
    /// Load the submission at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the path is missing, not a file, unreadable,
    /// or (on Unix) not executable.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let shown = path.display().to_string();
        let meta = std::fs::metadata(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LoadError::Missing {
                    path: shown.clone(),
                }
            } else {
                LoadError::Unreadable {
                    path: shown.clone(),
                    detail: e.to_string(),
                }
            }
        })?;
        if !meta.is_file() {
            return Err(LoadError::NotAFile { path: shown });
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if meta.permissions().mode() & 0o111 == 0 {
                return Err(LoadError::NotExecutable { path: shown });
            }
        }
        let bytes = std::fs::read(path).map_err(|e| LoadError::Unreadable {
            path: shown.clone(),
            detail: e.to_string(),
        })?;
        let source_digest = canonical_hash(HashDomain::SubmissionSource, &bytes);
        let id = path
            .file_name()
            .map_or_else(|| shown.clone(), |n| n.to_string_lossy().into_owned());
        debug!(path = %shown, digest = %source_digest, "submission loaded");
        Ok(Self {
            id,
            path: path.to_path_buf(),
            source_digest,
        })
    }

    fn call(&self, request: &Request) -> Result<Table, SubmissionError> {
        let entry_point = request.entry_point;
        let crashed = |detail: String| SubmissionError::Crashed {
            entry_point,
            detail,
        };
        let body = serde_json::to_vec(&request.to_json()).map_err(|e| crashed(e.to_string()))?;

        let mut child = Command::new(&self.path)
            .arg(entry_point.as_str())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| crashed(format!("spawn {}: {e}", self.path.display())))?;

        // A child that exits without reading stdin breaks the pipe; its exit
        // status below is the more useful report.
        let write_result = child
            .stdin
            .take()
            .map(|mut stdin| stdin.write_all(&body));

        let output = child
            .wait_with_output()
            .map_err(|e| crashed(format!("wait: {e}")))?;

        if !output.status.success() {
            let stderr = excerpt(&output.stderr);
            debug!(%entry_point, status = %output.status, %stderr, "submission call failed");
            return Err(match output.status.code() {
                Some(code) if code == i32::from(EXIT_NOT_IMPLEMENTED) => {
                    SubmissionError::NotImplemented { entry_point }
                }
                Some(_) => SubmissionError::Failed {
                    entry_point,
                    detail: stderr,
                },
                None => crashed(format!("terminated by signal: {}", output.status)),
            });
        }
        if let Some(Err(e)) = write_result {
            warn!(%entry_point, error = %e, "request write failed but submission exited cleanly");
            return Err(crashed(format!("write request: {e}")));
        }

        table_from_slice(&output.stdout).map_err(|e| SubmissionError::WrongType {
            entry_point,
            detail: e.to_string(),
        })
    }
}

fn excerpt(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    if trimmed.len() <= STDERR_EXCERPT_BYTES {
        return trimmed.to_string();
    }
    let mut end = STDERR_EXCERPT_BYTES;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}

impl SubmissionV1 for ProcessSubmission {
    fn submission_id(&self) -> &str {
        &self.id
    }

    fn source_digest(&self) -> Option<&ContentHash> {
        Some(&self.source_digest)
    }

    fn create_purchase_df(&self, records: &[Record]) -> Result<Table, SubmissionError> {
        self.call(&Request::with_records(EntryPoint::CreatePurchaseDf, records))
    }

    fn create_customer_df(&self, records: &[Record]) -> Result<Table, SubmissionError> {
        self.call(&Request::with_records(EntryPoint::CreateCustomerDf, records))
    }

    fn merge_customer_info(
        &self,
        purchases: &Table,
        customers: &Table,
    ) -> Result<Table, SubmissionError> {
        self.call(&Request::with_tables(
            EntryPoint::MergeCustomerInfo,
            &[purchases, customers],
        ))
    }

    fn get_repeat_customers(&self, purchases: &Table) -> Result<Table, SubmissionError> {
        self.call(&Request::with_tables(
            EntryPoint::GetRepeatCustomers,
            &[purchases],
        ))
    }

    fn calculate_total_spend(&self, purchases: &Table) -> Result<Table, SubmissionError> {
        self.call(&Request::with_tables(
            EntryPoint::CalculateTotalSpend,
            &[purchases],
        ))
    }
}
