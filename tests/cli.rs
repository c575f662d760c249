use std::fs;
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

fn run_script(source: &str) -> Output {
    let work = TempDir::new().expect("workdir");
    let script = work.path().join("script.lox");
    fs::write(&script, source).expect("write script");

    let mut cmd = Command::cargo_bin("treelox").expect("binary");
    cmd.arg(&script);

    cmd.output().expect("run treelox")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn file_runs_and_prints() {
    let out = run_script("print 2 + 3 * 4;\nprint 6 / 2;\nprint 7 / 2;\nprint \"a\" + \"b\";\n");
    assert_eq!(out.status.code(), Some(0), "stderr={}", stderr(&out));
    assert_eq!(stdout(&out), "14\n3\n3.5\nab\n");
    assert_eq!(stderr(&out), "");
}

#[test]
fn syntax_error_exits_64_without_running() {
    let out = run_script("print 1;\n* 3;\n");
    assert_eq!(out.status.code(), Some(64));
    assert_eq!(stdout(&out), "");
    assert_eq!(stderr(&out), "[Line 2] Error at '*': Missing left-hand operand.\n");
}

#[test]
fn lexical_error_exits_64() {
    let out = run_script("print \"abc;\n");
    assert_eq!(out.status.code(), Some(64));
    assert!(stderr(&out).contains("[Line 2] Error: Unterminated string."), "stderr={}", stderr(&out));
}

#[test]
fn runtime_error_exits_70() {
    let out = run_script("print 1;\nprint 1 + \"a\";\nprint 2;\n");
    assert_eq!(out.status.code(), Some(70));
    assert_eq!(stdout(&out), "1\n");
    assert_eq!(stderr(&out), "Operands must be two numbers or two strings.\n[line 2]\n");
}

#[test]
fn too_many_arguments_prints_usage() {
    let mut cmd = Command::cargo_bin("treelox").expect("binary");
    cmd.arg("one.lox").arg("two.lox");
    let out = cmd.output().expect("run treelox");
    assert_eq!(out.status.code(), Some(64));
    assert_eq!(stdout(&out), "Usage: treelox [script]\n");
}

#[test]
fn missing_file_exits_66() {
    let work = TempDir::new().expect("workdir");
    let mut cmd = Command::cargo_bin("treelox").expect("binary");
    cmd.arg(work.path().join("missing.lox"));
    let out = cmd.output().expect("run treelox");
    assert_eq!(out.status.code(), Some(66));
}

#[test]
fn repl_keeps_going_after_errors() {
    let mut cmd = Command::cargo_bin("treelox").expect("binary");
    cmd.write_stdin("print 1 + 2;\nprint -nil;\n* 3;\nprint \"done\";\n");
    let out = cmd.output().expect("run treelox");
    assert!(out.status.success(), "stderr={}", stderr(&out));
    assert_eq!(stdout(&out), "> 3\n> > > done\n> \n");
    assert_eq!(stderr(&out), "Operand must be a number.\n[line 1]\n\
                              [Line 1] Error at '*': Missing left-hand operand.\n");
}
