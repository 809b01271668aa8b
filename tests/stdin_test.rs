use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::Value;

/// Runs the stdin converter on `input` and parses its JSON report.
fn run_convert_stdin(input: &[u8]) -> Value {
    let mut child = Command::new(env!("CARGO_BIN_EXE_convert_stdin"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn convert_stdin");

    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(input)
        .expect("write stdin");

    let output = child.wait_with_output().expect("wait for convert_stdin");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("JSON on stdout")
}

#[test]
fn reports_latex_and_bibtex() {
    let html = concat!(
        r##"<html><body><p>Claim<a href="#ftnt1" id="ftnt_ref1">[1]</a></p>"##,
        r##"<div><p><a href="#ftnt_ref1" id="ftnt1">[1]</a><span>@book{ref1, title={T}}</span></p></div></body></html>"##,
    );
    let report = run_convert_stdin(html.as_bytes());

    assert!(report["latex"]
        .as_str()
        .expect("latex string")
        .contains(r"Claim\cite{ref1}"));
    assert_eq!(report["bibtex"], "@book{ref1, title={T}}");
    assert!(report["error"].is_null());
}

#[test]
fn reports_errors_in_the_error_field() {
    let report = run_convert_stdin(b"<html><body><h5>Deep</h5></body></html>");

    assert!(report["latex"].is_null());
    assert!(report["bibtex"].is_null());
    assert_eq!(report["error"], "Unsupported tag h5 with content:\n\tDeep");
}

#[test]
fn honours_the_declared_charset() {
    let report = run_convert_stdin(
        b"<html><head><meta charset=\"windows-1252\"></head><body><p>Caf\xE9</p></body></html>",
    );
    assert!(report["latex"].as_str().expect("latex string").contains("Café"));
}
