//! Cross-process determinism: the same seed gives byte-identical output.
//!
//! Spawns the `grade_fixture` binary under several environment variants and
//! asserts every variant prints the same ledger and report digest. Grading
//! must not be influenced by cwd, locale, or log settings.

use std::path::Path;
use std::process::Command;

const FIXTURE_BIN: &str = env!("CARGO_BIN_EXE_grade_fixture");

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(args: &[&str], work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let mut command = Command::new(FIXTURE_BIN);
    command.args(args).current_dir(work_dir);
    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!(
            "failed to spawn {FIXTURE_BIN} (work_dir={work_dir}, overrides={env_overrides:?}): {e}"
        )
    });
    assert!(
        output.status.success(),
        "grade_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_four_env_variants() {
    let root = workspace_root();
    let tmp = std::env::temp_dir().to_string_lossy().to_string();
    let baseline = run_variant(&["reference", "5"], &root, &[]);

    assert!(baseline.contains("passed=5"), "baseline: {baseline}");
    assert!(baseline.contains("report_digest=sha256:"));

    let variants: [(&str, &[(&str, &str)]); 3] = [
        (tmp.as_str(), &[]),
        (&root, &[("LC_ALL", "C"), ("LANG", "C")]),
        (&root, &[("COURSEGRADE_LOG", "debug"), ("TZ", "Pacific/Auckland")]),
    ];
    for (dir, overrides) in variants {
        assert_eq!(
            run_variant(&["reference", "5"], dir, overrides),
            baseline,
            "output differs under work_dir={dir}, overrides={overrides:?}"
        );
    }
}

#[test]
fn crossproc_each_builtin_is_stable() {
    let root = workspace_root();
    for name in ["reference", "hardcoded", "stub", "faulty"] {
        let first = run_variant(&[name, "9"], &root, &[]);
        let second = run_variant(&[name, "9"], &root, &[]);
        assert_eq!(first, second, "{name} output differs between processes");
    }
}

#[test]
fn crossproc_hardcoded_scores_three() {
    let out = run_variant(&["hardcoded"], &workspace_root(), &[]);
    assert!(out.contains("❌ TC4: Identifying repeat buyers failed"));
    assert!(out.contains("❌ TC5: Calculating total spend per customer failed"));
    assert!(out.contains("passed=3"));
}
