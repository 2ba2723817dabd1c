use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const BUILD_FILE: &str = r#"{
    "targets": {
        "concat": {
            "greeting": { "src": ["parts/*.txt"], "dest": "out/greeting.txt", "separator": " " }
        },
        "clean": { "out": ["out"] }
    },
    "tasks": {
        "build": ["clean", "concat:greeting"],
        "default": ["build"],
        "broken": ["build", "nope"]
    }
}"#;

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("stepwise.json"), BUILD_FILE).unwrap();
    fs::create_dir_all(dir.path().join("parts")).unwrap();
    fs::write(dir.path().join("parts/a.txt"), "hello").unwrap();
    fs::write(dir.path().join("parts/b.txt"), "world").unwrap();
    dir
}

fn stepwise(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stepwise").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("STEPWISE_CONFIG")
        .env("STEPWISE_LOG", "off");
    cmd
}

#[test]
fn test_default_task_runs_without_arguments() {
    let dir = project();

    stepwise(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Done 'default': 2 step(s)"));

    assert_eq!(
        fs::read_to_string(dir.path().join("out/greeting.txt")).unwrap(),
        "hello world"
    );
}

#[test]
fn test_unknown_task_fails_without_running_steps() {
    let dir = project();

    stepwise(&dir)
        .arg("broken")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_plan_prints_flattened_order() {
    let dir = project();

    stepwise(&dir)
        .args(["plan", "default"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. clean:out"))
        .stdout(predicate::str::contains("2. concat:greeting"));
}

#[test]
fn test_list_and_dry_run() {
    let dir = project();

    stepwise(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("build: clean, concat:greeting"));

    stepwise(&dir)
        .args(["run", "build", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(skipped)"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = project();

    stepwise(&dir)
        .args(["--config", "missing.json", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn test_failing_step_exits_non_zero_and_stops() {
    let dir = project();
    fs::write(
        dir.path().join("stepwise.json"),
        r#"{
            "targets": {
                "concat": {
                    "hollow": { "src": ["missing/*.txt"], "dest": "out/hollow.txt" },
                    "greeting": { "src": ["parts/*.txt"], "dest": "out/greeting.txt" }
                }
            },
            "tasks": { "default": ["concat:hollow", "concat:greeting"] }
        }"#,
    )
    .unwrap();

    stepwise(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("concat:hollow"))
        .stdout(predicate::str::contains("Done").not());

    assert!(!dir.path().join("out/greeting.txt").exists());
}
