// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Integration tests for the `genscript` binary.
//! Each test runs the built binary on a fixture and checks exit status and output.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn genscript(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_genscript"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run genscript")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn check_valid_script() {
    let path = fixture("valid.rbc");
    let out = genscript(&["check", path.to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Dynamic offsets (2)"));
    assert!(text.contains("MSG_FACE"));
    assert!(text.contains("Check OK"));
}

#[test]
fn check_reports_every_diagnostic() {
    let path = fixture("broken.rbc");
    let out = genscript(&["check", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    let text = stderr(&out);
    assert!(text.contains("error[E0211]: Dynamic offset \"@text\" is not defined."));
    assert!(text.contains("error[E0212]: Symbol \"MSG_FATE\" is not defined."));
    assert!(text.contains("did you mean `MSG_FACE`?"));
    assert!(text.contains("error[E0301]: Expected 4 argument(s), got 5."));
    assert!(text.contains("Check FAILED: 4 diagnostics"));
}

#[test]
fn check_json_report() {
    let path = fixture("broken.rbc");
    let out = genscript(&["check", "--format", "json", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).expect("valid json");
    assert_eq!(report["success"], false);
    assert_eq!(report["error_count"], 4);
    let codes: Vec<&str> = report["diagnostics"]
        .as_array()
        .expect("diagnostics array")
        .iter()
        .filter_map(|d| d["code"].as_str())
        .collect();
    assert_eq!(codes, vec!["E0211", "E0211", "E0212", "E0301"]);
    assert_eq!(report["diagnostics"][0]["offset"], 37);
    assert_eq!(report["diagnostics"][0]["length"], 5);
}

#[test]
fn lex_prints_tokens() {
    let path = fixture("valid.rbc");
    let out = genscript(&["lex", path.to_str().unwrap()]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Identifier(\"msgbox\")"));
    assert!(text.contains("Symbol(\"MSG_FACE\")"));
}

#[test]
fn parse_summarizes_blocks() {
    let path = fixture("valid.rbc");
    let out = genscript(&["parse", path.to_str().unwrap()]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("macro #dynamic"));
    assert!(text.contains("block `#org @1` (2 commands)"));
}

#[test]
fn explain_known_and_unknown_codes() {
    let out = genscript(&["explain", "e0302"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("mismatched argument type"));

    let out = genscript(&["explain", "E9999"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown error code `E9999`"));
}

#[test]
fn templates_describe_commands_and_macros() {
    let out = genscript(&["templates", "msgbox"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("msgbox [offset] [type]"));

    let out = genscript(&["templates", "#org"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("#org [offset]"));
    assert!(text.contains("Aliases: seek"));

    let out = genscript(&["templates"]);
    assert!(stdout(&out).contains("trainerbattle"));

    let out = genscript(&["templates", "nothing"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn missing_file_fails_cleanly() {
    let out = genscript(&["check", "does-not-exist.rbc"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("reading does-not-exist.rbc"));
}
