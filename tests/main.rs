mod config;

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn its_executable() {
    let mut cmd = Command::cargo_bin("edgectl").unwrap();

    // running the CLI with no command prints usage to stderr
    let result = cmd.assert();
    result.failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn verbose_and_json_are_rejected_before_any_request() {
    let mut cmd = Command::cargo_bin("edgectl").unwrap();
    let result = cmd
        .env("EDGECTL_API_TOKEN", "unused")
        .env("EDGECTL_ENDPOINT", "http://127.0.0.1:9")
        .args(["dictionary", "list", "-s", "svc", "--version", "1", "--json", "--verbose"])
        .assert();
    result
        .failure()
        .stdout(predicate::str::contains(r#""code":"E016""#));
}
