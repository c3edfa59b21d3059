use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

#[test]
fn it_has_a_config_auth_command() {
    let mut cmd = Command::cargo_bin("edgectl").unwrap();
    cmd.arg("config").arg("auth").arg("--help").assert().success();
}

#[test]
fn it_errors_on_an_empty_api_token() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("edgectl").unwrap();
    let result = cmd
        .env("EDGECTL_CONFIG_HOME", temp_dir.path())
        .arg("config")
        .arg("auth")
        .write_stdin("\n")
        .assert();
    result.failure().stderr(predicate::str::contains("E029"));
}
