//! End-to-end checks of `ground_rule::run` over real files.

use ground_rule::{run, AnalyzerError, ConfigError, DetectorConfig, FileStatus, TitleVerdict};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SMELLY: &str = "\
// driver entry points
#include \"driver.h\"

enum mode { MODE_ON, MODE_OFF };
typedef enum { RED, GREEN, BLUE } color_t;
typedef enum { LOW, MID, HIGH } level_e;

void ResetDevice(void)
{
\tint retries;
\tint delay = 10;
\tif (delay) {
\t\twhile (delay) {
\t\t\tfor (;;) {
\t\t\t\tdelay--;
\t\t\t\tbreak;
\t\t\t}
\t\t}
\t}
}

void on_irq_handler(int irq);

int clean_function(int value)
{
\t/* fine */
\tint total = value + 1;
\treturn total;
}
";

const CLEAN: &str = "\
/* A well-behaved file. */
typedef enum { IDLE, BUSY, DONE } state_e;

int step(int input)
{
\tint next = input;
\treturn next;
}
";

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

fn lines(report: &ground_rule::Report, path: &Path, rule: &str) -> Vec<usize> {
    report
        .file(path)
        .expect("file in report")
        .findings_for(rule)
        .iter()
        .map(|f| f.location.line)
        .collect()
}

#[test]
fn every_rule_reports_on_smelly_file() {
    let dir = TempDir::new().expect("tempdir");
    let smelly = write(&dir, "smelly.c", SMELLY);

    let report = run(None, &[smelly.clone()], DetectorConfig::default()).expect("run");

    assert_eq!(lines(&report, &smelly, "void-function"), vec![8]);
    assert_eq!(lines(&report, &smelly, "function-naming"), vec![8]);
    assert_eq!(lines(&report, &smelly, "indent-depth"), vec![15]);
    assert_eq!(lines(&report, &smelly, "small-enum"), vec![4]);
    assert_eq!(lines(&report, &smelly, "enum-typedef-suffix"), vec![5]);
    assert_eq!(lines(&report, &smelly, "comment-style"), vec![1]);
    assert_eq!(lines(&report, &smelly, "uninit-local"), vec![10]);
    assert!(report.title.is_none());

    let rules: Vec<&String> = match &report.files[0].status {
        FileStatus::Checked { findings } => findings.keys().collect(),
        other => panic!("unexpected status {other:?}"),
    };
    assert_eq!(
        rules,
        vec![
            "void-function",
            "function-naming",
            "indent-depth",
            "small-enum",
            "enum-typedef-suffix",
            "comment-style",
            "uninit-local",
        ]
    );
}

#[test]
fn clean_file_has_no_findings() {
    let dir = TempDir::new().expect("tempdir");
    let clean = write(&dir, "clean.c", CLEAN);

    let report = run(Some("Add stepper"), &[clean], DetectorConfig::default()).expect("run");

    assert_eq!(report.total_findings(), 0);
    assert!(!report.has_problems());
    assert_eq!(
        report.title.as_ref().map(|t| &t.verdict),
        Some(&TitleVerdict::Pass)
    );
}

#[test]
fn parse_failure_is_isolated() {
    let dir = TempDir::new().expect("tempdir");
    let first = write(&dir, "first.c", CLEAN);
    let broken = write(&dir, "broken.c", "int broken( {\n");
    let missing = dir.path().join("missing.c");
    let last = write(&dir, "last.c", SMELLY);

    let files = vec![first.clone(), broken.clone(), missing.clone(), last.clone()];
    let report = run(None, &files, DetectorConfig::default()).expect("run");

    let order: Vec<&Path> = report.files.iter().map(|f| f.path.as_path()).collect();
    assert_eq!(order, vec![&*first, &*broken, &*missing, &*last]);

    assert!(matches!(
        report.file(&broken).map(|f| &f.status),
        Some(FileStatus::ParseFailed { .. })
    ));
    assert_eq!(report.file(&broken).map(|f| f.findings().count()), Some(0));
    assert!(matches!(
        report.file(&missing).map(|f| &f.status),
        Some(FileStatus::Unreadable { .. })
    ));
    assert_eq!(report.failed_files().count(), 2);
    assert!(!lines(&report, &last, "void-function").is_empty());

    let text = report.render_text();
    assert!(text.contains("== PARSE FAILED: "));
    assert!(text.contains("== UNREADABLE: "));
}

#[test]
fn comments_in_macros_are_checked() {
    let dir = TempDir::new().expect("tempdir");
    let macros = write(
        &dir,
        "macros.h",
        "#define LIMIT 8 // upper bound\n\
         #define TWICE(x) \\\n\
         \t((x) * 2) // doubled\n\
         /* ok */\n\
         #define NAME \"a // b\"\n",
    );

    let report = run(None, &[macros.clone()], DetectorConfig::default()).expect("run");

    assert_eq!(lines(&report, &macros, "comment-style"), vec![1, 3]);
}

#[test]
fn unterminated_comment_is_reported() {
    let dir = TempDir::new().expect("tempdir");
    let open = write(&dir, "open.c", "int a;\n/* never closed\n");

    let report = run(None, &[open.clone()], DetectorConfig::default()).expect("run");

    assert!(matches!(
        report.file(&open).map(|f| &f.status),
        Some(FileStatus::Checked { .. })
    ));
    assert_eq!(lines(&report, &open, "comment-style"), vec![2]);
}

#[test]
fn syntax_errors_do_not_hide_other_items() {
    let dir = TempDir::new().expect("tempdir");
    let exported = write(
        &dir,
        "exported.c",
        "#define EXPORT\nEXPORT int foo(void);\nvoid DoIt(void) { }\n",
    );

    let report = run(None, &[exported.clone()], DetectorConfig::default()).expect("run");

    assert_eq!(lines(&report, &exported, "void-function"), vec![3]);
    assert_eq!(lines(&report, &exported, "function-naming"), vec![3]);
}

#[test]
fn sized_local_arrays_are_initialized() {
    let dir = TempDir::new().expect("tempdir");
    let arrays = write(
        &dir,
        "arrays.c",
        "int fill(int n)\n\
         {\n\
         \tchar buf[64];\n\
         \tchar name[] = { 'a', 0 };\n\
         \treturn n;\n\
         }\n",
    );

    let report = run(None, &[arrays.clone()], DetectorConfig::default()).expect("run");

    assert_eq!(lines(&report, &arrays, "uninit-local"), vec![4]);
}

#[test]
fn repeated_runs_are_identical() {
    let dir = TempDir::new().expect("tempdir");
    let files = vec![write(&dir, "a.c", SMELLY), write(&dir, "b.c", CLEAN)];

    let first = run(Some("fix bug"), &files, DetectorConfig::default()).expect("run");
    let second = run(Some("fix bug"), &files, DetectorConfig::default()).expect("run");

    assert_eq!(first, second);
    assert_eq!(first.render_text(), second.render_text());
}

#[test]
fn commit_title_verdicts() {
    let verdict = |title: &str| {
        run(Some(title), &[], DetectorConfig::default())
            .expect("run")
            .title
            .map(|t| t.verdict)
    };

    assert_eq!(verdict(""), Some(TitleVerdict::Empty));
    assert_eq!(verdict("Fix bug"), Some(TitleVerdict::Pass));
    assert_eq!(verdict("module: fix bug"), Some(TitleVerdict::Pass));
    assert!(matches!(
        verdict("fix bug"),
        Some(TitleVerdict::Malformed { .. })
    ));
}

#[test]
fn title_newlines_are_removed() {
    let report = run(Some("fix\nbug"), &[], DetectorConfig::default()).expect("run");
    assert_eq!(report.title.as_ref().map(|t| t.title.as_str()), Some("fixbug"));
    assert!(report.render_text().starts_with("==== fixbug ====\n"));
}

#[test]
fn disabled_rules_do_not_run() {
    let dir = TempDir::new().expect("tempdir");
    let smelly = write(&dir, "smelly.c", SMELLY);
    let config = DetectorConfig::builder()
        .disable("comment-style")
        .disable("commit-title")
        .build()
        .expect("config");

    let report = run(Some("fix bug"), &[smelly.clone()], config).expect("run");

    assert!(report.title.is_none());
    assert!(lines(&report, &smelly, "comment-style").is_empty());
    assert_eq!(lines(&report, &smelly, "void-function"), vec![8]);
}

#[test]
fn thresholds_change_findings() {
    let dir = TempDir::new().expect("tempdir");
    let smelly = write(&dir, "smelly.c", SMELLY);
    let config = DetectorConfig::builder()
        .indent_limit(5)
        .enum_element_min(4)
        .build()
        .expect("config");

    let report = run(None, &[smelly.clone()], config).expect("run");

    assert!(lines(&report, &smelly, "indent-depth").is_empty());
    assert_eq!(lines(&report, &smelly, "small-enum"), vec![4, 5, 6]);
}

#[test]
fn unknown_rule_is_rejected() {
    let config = DetectorConfig::builder()
        .disable("no-such-rule")
        .build()
        .expect("names are checked against the registry later");

    let err = run(None, &[], config).expect_err("unknown rule");
    assert!(matches!(
        err,
        AnalyzerError::Config(ConfigError::UnknownRule { ref name }) if name == "no-such-rule"
    ));
}

#[test]
fn report_serializes_to_json() {
    let dir = TempDir::new().expect("tempdir");
    let smelly = write(&dir, "smelly.c", SMELLY);
    let broken = write(&dir, "broken.c", "int broken( {\n");

    let report = run(Some("fix bug"), &[smelly, broken], DetectorConfig::default()).expect("run");
    let json = serde_json::to_value(&report).expect("serialize");

    assert_eq!(json["title"]["verdict"], "malformed");
    assert_eq!(json["files"][0]["status"], "checked");
    assert_eq!(
        json["files"][0]["findings"]["void-function"][0]["code"],
        "GR001"
    );
    assert_eq!(
        json["files"][0]["findings"]["void-function"][0]["symbol"],
        "ResetDevice"
    );
    assert_eq!(json["files"][1]["status"], "parse_failed");
}
