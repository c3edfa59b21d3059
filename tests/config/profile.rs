use assert_cmd::Command;
use assert_fs::TempDir;
use camino::Utf8PathBuf;
use predicates::prelude::*;

use houston::{Config, Profile};

const CUSTOM_PROFILE: &str = "custom-profile";
const CUSTOM_API_TOKEN: &str = "custom-api-token";

#[test]
fn it_can_list_no_profiles() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("edgectl").unwrap();
    let result = cmd
        .env("EDGECTL_CONFIG_HOME", temp_dir.path())
        .arg("config")
        .arg("list")
        .assert();
    result.success().stdout(predicate::str::contains("No profiles"));
}

#[test]
fn it_can_list_and_delete_one_profile() {
    let temp_dir = TempDir::new().unwrap();
    let home = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let config = Config::new(Some(&home), None, None).unwrap();
    Profile::set_api_token(CUSTOM_PROFILE, &config, CUSTOM_API_TOKEN.to_string()).unwrap();

    let mut cmd = Command::cargo_bin("edgectl").unwrap();
    cmd.env("EDGECTL_CONFIG_HOME", &home)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(CUSTOM_PROFILE));

    let mut cmd = Command::cargo_bin("edgectl").unwrap();
    cmd.env("EDGECTL_CONFIG_HOME", &home)
        .args(["config", "delete", CUSTOM_PROFILE])
        .assert()
        .success();
    assert!(Profile::list(&config).unwrap().is_empty());
}
