use assert_fs::TempDir;
use camino::Utf8PathBuf;
use houston::{Config, CredentialOrigin, HoustonProblem, Profile};

fn get_config(override_api_token: Option<String>) -> (TempDir, Config) {
    let tmp_home = TempDir::new().unwrap();
    let tmp_path = Utf8PathBuf::try_from(tmp_home.path().to_path_buf()).unwrap();
    let config = Config::new(Some(&tmp_path), override_api_token, None).unwrap();
    (tmp_home, config)
}

#[test]
fn it_can_set_and_get_an_api_token_via_creds_file() {
    let (_tmp, config) = get_config(None);
    let profile = "default";
    let token = "superdupersecrettoken".to_string();

    Profile::set_api_token(profile, &config, token.clone()).expect("setting api token failed");

    let credential = Profile::get_credential(profile, &config).expect("getting credential failed");
    assert_eq!(credential.api_token, token);
    assert_eq!(
        credential.origin,
        CredentialOrigin::ConfigFile(profile.to_string())
    );
}

#[test]
fn it_prefers_the_override_token() {
    let token = "envtoken".to_string();
    let (_tmp, config) = get_config(Some(token.clone()));

    Profile::set_api_token("default", &config, "filetoken".to_string()).unwrap();

    let credential = Profile::get_credential("default", &config).unwrap();
    assert_eq!(credential.api_token, token);
    assert_eq!(credential.origin, CredentialOrigin::EnvVar);
}

#[test]
fn it_lists_many_profiles_in_order() {
    let (_tmp, config) = get_config(None);

    Profile::set_api_token("personal", &config, "personaltoken".to_string()).unwrap();
    Profile::set_api_token("corporate", &config, "corporatetoken".to_string()).unwrap();

    let profiles = Profile::list(&config).expect("listing profiles failed");
    assert_eq!(profiles, vec!["corporate".to_string(), "personal".to_string()]);
}

#[test]
fn it_lists_nothing_without_profiles() {
    let (_tmp, config) = get_config(None);
    assert!(Profile::list(&config).unwrap().is_empty());
}

#[test]
fn it_can_delete_a_profile() {
    let (_tmp, config) = get_config(None);
    Profile::set_api_token("gone", &config, "token".to_string()).unwrap();
    Profile::delete("gone", &config).unwrap();
    assert!(Profile::list(&config).unwrap().is_empty());

    let err = Profile::get_credential("gone", &config).unwrap_err();
    assert!(matches!(err, HoustonProblem::ProfileNotFound(_)));
}

#[test]
fn deleting_a_missing_profile_is_not_found() {
    let (_tmp, config) = get_config(None);
    let err = Profile::delete("nope", &config).unwrap_err();
    assert!(matches!(err, HoustonProblem::ProfileNotFound(_)));
}
