//! Source-level lock tests over the production crates.
//!
//! Proves:
//! 1. Raw `COURSEGRADE::` domain literals appear only in `hash_domain.rs`
//! 2. Harness library code never writes to stdout (stdout belongs to the ledger)
//!
//! Lines inside `#[cfg(test)]` blocks and `//` comment lines are ignored.

use std::path::{Path, PathBuf};

const KERNEL_SRC: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../kernel/src");
const HARNESS_SRC: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../harness/src");

/// One non-test, non-comment source line.
struct SourceLine {
    path: PathBuf,
    number: usize,
    text: String,
}

impl std::fmt::Display for SourceLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  {}:{}: {}", self.path.display(), self.number, self.text)
    }
}

fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let Ok(entries) = std::fs::read_dir(dir) else {
        return files;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            files.extend(rust_files(&path));
        } else if path.extension().is_some_and(|e| e == "rs") {
            files.push(path);
        }
    }
    files.sort();
    files
}

/// Production lines of every `.rs` file under `dir`.
fn production_lines(dir: &str) -> Vec<SourceLine> {
    let root = Path::new(dir);
    assert!(root.exists(), "source directory not found at {dir}");

    let mut out = Vec::new();
    for path in rust_files(root) {
        let Ok(content) = std::fs::read_to_string(&path) else {
            continue;
        };
        // Brace depth at which the current #[cfg(test)] block opened.
        let mut depth: usize = 0;
        let mut test_block: Option<usize> = None;
        let mut cfg_test_pending = false;

        for (i, line) in content.lines().enumerate() {
            let text = line.trim();
            if text.contains("#[cfg(test)]") {
                cfg_test_pending = true;
                continue;
            }
            let opens = line.matches('{').count();
            let closes = line.matches('}').count();
            if cfg_test_pending && opens > 0 {
                test_block = Some(depth);
                cfg_test_pending = false;
            }
            depth = (depth + opens).saturating_sub(closes);

            if let Some(open_depth) = test_block {
                if depth <= open_depth {
                    test_block = None;
                }
                continue;
            }
            if text.starts_with("//") {
                continue;
            }
            out.push(SourceLine {
                path: path.clone(),
                number: i + 1,
                text: text.to_string(),
            });
        }
    }
    out
}

fn report(violations: &[SourceLine]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn no_raw_domain_literals_outside_authority() {
    let violations: Vec<SourceLine> = [KERNEL_SRC, HARNESS_SRC]
        .into_iter()
        .flat_map(production_lines)
        .filter(|l| !l.path.ends_with("hash_domain.rs"))
        .filter(|l| l.text.contains("b\"COURSEGRADE::"))
        .collect();
    assert!(
        violations.is_empty(),
        "raw COURSEGRADE:: domain literals found outside hash_domain.rs:\n{}",
        report(&violations)
    );
}

#[test]
fn no_println_in_harness_library_code() {
    let violations: Vec<SourceLine> = production_lines(HARNESS_SRC)
        .into_iter()
        .filter(|l| !l.path.components().any(|c| c.as_os_str() == "bin"))
        .filter(|l| {
            let without_stderr = l.text.replace("eprintln!(", "").replace("eprint!(", "");
            without_stderr.contains("println!(") || without_stderr.contains("print!(")
        })
        .collect();
    assert!(
        violations.is_empty(),
        "stdout writes found in harness library code:\n{}",
        report(&violations)
    );
}

#[test]
fn scanner_skips_test_blocks_and_comments() {
    let lines = production_lines(KERNEL_SRC);
    assert!(lines.iter().any(|l| l.path.ends_with("hash_domain.rs")));
    assert!(lines.iter().all(|l| !l.text.starts_with("//")));
    assert!(lines.iter().all(|l| !l.text.contains("#[cfg(test)]")));
}
