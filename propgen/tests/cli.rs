//! Command-line tests driving the propgen binary against temp directories.

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn propgen(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_propgen"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn write_manifest(dir: &Path, generator: &str) {
    let content = format!(
        "[generator]\nproject = \"app\"\n{}\n\n[properties]\n\"git.commit.id\" = \"abc123\"\n",
        generator
    );
    fs::write(dir.join("propgen.toml"), content).unwrap();
}

#[test]
fn generate_then_skip_on_new_build_time() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path(), "output = \"target\"");

    propgen(temp.path())
        .args(["generate", "--set", "git.build.time=2024-01-01T00:00:00Z"])
        .assert()
        .success()
        .stdout(contains("Wrote"))
        .stderr(contains("Writing properties file to"));

    propgen(temp.path())
        .args(["generate", "--set", "git.build.time=2024-02-02T00:00:00Z"])
        .assert()
        .success()
        .stdout(contains("is up to date"))
        .stderr(contains("(for module app)"));

    let content = fs::read_to_string(temp.path().join("target/git.properties")).unwrap();
    assert!(content.contains(r"git.build.time=2024-01-01T00\:00\:00Z"));
    assert!(content.contains("git.commit.id=abc123"));
}

#[test]
fn check_exit_code_follows_state() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path(), "format = \"json\"\nfilename = \"git.json\"");

    propgen(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stdout(contains("does not exist"));

    propgen(temp.path()).arg("generate").assert().success();

    propgen(temp.path())
        .args(["check", "--set", "git.build.time=later"])
        .assert()
        .success()
        .stdout(contains("is up to date"));

    propgen(temp.path())
        .args(["check", "--set", "git.commit.id=def456"])
        .assert()
        .failure()
        .stdout(contains("is out of date"));

    assert!(!fs::read_to_string(temp.path().join("git.json"))
        .unwrap()
        .contains("def456"));
}

#[test]
fn generate_reads_computed_properties_file() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path(), "format = \"json\"\nfilename = \"out/git.json\"");
    fs::write(
        temp.path().join("computed.json"),
        r#"{"git.commit.id": "fromfile", "git.dirty": true}"#,
    )
    .unwrap();

    propgen(temp.path())
        .args(["generate", "--from", "computed.json", "--changed-list", "changed.txt"])
        .assert()
        .success();

    let written = fs::read_to_string(temp.path().join("out/git.json")).unwrap();
    assert!(written.contains(r#""git.commit.id": "fromfile""#));
    assert!(written.contains(r#""git.dirty": "true""#));
    assert!(fs::read_to_string(temp.path().join("changed.txt"))
        .unwrap()
        .contains("git.json"));
}

#[test]
fn invalid_manifest_reports_diagnostic() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("propgen.toml"),
        "[generator]\nproject = \"app\"\nformat = \"yaml\"\n",
    )
    .unwrap();

    propgen(temp.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(contains("unknown format 'yaml'"));
}

#[test]
fn unwritable_target_is_fatal() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path(), "filename = \"blocker/git.properties\"");
    fs::write(temp.path().join("blocker"), "a file, not a directory").unwrap();

    propgen(temp.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(contains("cannot create parent directories"));
}
