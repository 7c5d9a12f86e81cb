//! Black-box tests against the built `nookc` binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn run_evaluates_a_script_silently_on_success() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("program.nook");
    std::fs::write(&script, "let x = 5; let y = 10; x + y;").unwrap();

    // Unlike the REPL, a successful `run` prints nothing: the final
    // value is only echoed per-line when reading interactively.
    Command::cargo_bin("nookc")
        .unwrap()
        .arg("run")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn run_reports_runtime_errors_and_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("program.nook");
    std::fs::write(&script, "5 + true;").unwrap();

    Command::cargo_bin("nookc")
        .unwrap()
        .arg("run")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("type mismatch"));
}

#[test]
fn run_reports_parse_errors_and_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("program.nook");
    std::fs::write(&script, "let x 5;").unwrap();

    Command::cargo_bin("nookc")
        .unwrap()
        .arg("run")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn run_with_a_missing_file_is_an_io_error() {
    Command::cargo_bin("nookc")
        .unwrap()
        .arg("run")
        .arg("/nonexistent/does-not-exist.nook")
        .assert()
        .failure();
}

#[test]
fn print_ast_flag_reprints_instead_of_evaluating() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("program.nook");
    std::fs::write(&script, "1 + 2;").unwrap();

    Command::cargo_bin("nookc")
        .unwrap()
        .arg("--print-ast")
        .arg("run")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 + 2)"));
}

#[test]
fn repl_evaluates_piped_stdin_lines() {
    Command::cargo_bin("nookc")
        .unwrap()
        .write_stdin("let x = 21; x * 2;\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("42"));
}
