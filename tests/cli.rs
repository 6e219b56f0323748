use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn filematch() -> Command {
    #[allow(deprecated)]
    let cmd = Command::cargo_bin("filematch").unwrap();
    cmd
}

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn equal_files_exit_successfully() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.txt", "I am sample file");
    let b = write(dir.path(), "b.txt", "I am sample file");

    filematch()
        .arg(&a)
        .arg(&b)
        .arg("--omit")
        .arg("name,lastModified")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn different_contents_exit_with_failure_and_diff() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.txt", "I am sample file");
    let b = write(dir.path(), "b.txt", "I am other file!");

    filematch()
        .arg("--omit")
        .arg("name")
        .arg("--omit")
        .arg("lastModified")
        .arg(&a)
        .arg(&b)
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Expected File contents to be:"))
        .stderr(predicate::str::contains("- I am other file!"))
        .stderr(predicate::str::contains("+ I am sample file"));
}

#[test]
fn negated_run_succeeds_for_different_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.txt", "one");
    let b = write(dir.path(), "b.json", "two");

    filematch().arg(&a).arg(&b).arg("--not").assert().success();
}

#[test]
fn same_path_twice_hits_the_identity_guard() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.txt", "I am sample file");

    filematch()
        .arg(&a)
        .arg(&a)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "replace \"to_be_file\" with \"to_be\"",
        ));

    filematch()
        .arg(&a)
        .arg(&a)
        .arg("--not")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "replace \"to_be_file\" with \"to_be\"",
        ));
}

#[test]
fn unknown_content_mode_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.txt", "x");

    filematch()
        .arg(&a)
        .arg(&a)
        .arg("--content")
        .arg("readAsJson")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --content value: readAsJson"));
}
