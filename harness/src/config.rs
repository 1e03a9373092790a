//! Grade configuration and workspace path resolution.
//!
//! The grader lives next to the learner's workspace:
//!
//! ```text
//! <root>/
//!   harness/grade               (running executable)
//!   student_workspace/
//!     solution                  (submission)
//!     report.txt                (written only on request)
//! ```

use std::path::{Path, PathBuf};

/// Default workspace directory name, sibling of the harness directory.
pub const DEFAULT_WORKSPACE_DIR: &str = "student_workspace";
/// Default submission file name inside the workspace.
pub const DEFAULT_SUBMISSION_FILE: &str = "solution";
/// Default plain-text report file name.
pub const DEFAULT_REPORT_FILE: &str = "report.txt";
/// Default JSON report file name.
pub const DEFAULT_JSON_REPORT_FILE: &str = "report.json";

/// Configuration for one grading run.
///
/// Every field has a default; tests and the `grade` binary override only
/// what they need.
#[derive(Debug, Clone)]
pub struct GradeConfig {
    /// Seed for the anti-cheat identifiers. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Workspace directory name, resolved against the harness parent.
    pub workspace_dir: String,
    /// Submission file name inside the workspace.
    pub submission_file: String,
    /// Plain-text report file name inside the workspace.
    pub report_file: String,
    /// JSON report file name inside the workspace.
    pub json_report_file: String,
}

impl Default for GradeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            workspace_dir: DEFAULT_WORKSPACE_DIR.into(),
            submission_file: DEFAULT_SUBMISSION_FILE.into(),
            report_file: DEFAULT_REPORT_FILE.into(),
            json_report_file: DEFAULT_JSON_REPORT_FILE.into(),
        }
    }
}

/// Resolved filesystem locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    pub workspace: PathBuf,
    pub submission: PathBuf,
    pub report: PathBuf,
    pub json_report: PathBuf,
}

impl WorkspacePaths {
    /// Resolve paths relative to `harness_dir`: the workspace is a sibling.
    #[must_use]
    pub fn resolve(harness_dir: &Path, config: &GradeConfig) -> Self {
        let parent = harness_dir.parent().unwrap_or(harness_dir);
        let workspace = parent.join(&config.workspace_dir);
        Self {
            submission: workspace.join(&config.submission_file),
            report: workspace.join(&config.report_file),
            json_report: workspace.join(&config.json_report_file),
            workspace,
        }
    }
}

/// Directory holding the running executable.
///
/// # Errors
///
/// Returns the I/O error if the executable path cannot be determined.
pub fn harness_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("executable has no parent directory: {}", exe.display()),
        )
    })
}
