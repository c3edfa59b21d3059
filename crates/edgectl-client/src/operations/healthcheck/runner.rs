use reqwest::Method;

use crate::blocking::EdgeClient;
use crate::operations::healthcheck::types::*;
use crate::shared::{NamedRef, VersionRef};
use crate::EdgeClientError;

const RESOURCE: &str = "healthcheck";

pub fn create(input: &CreateHealthcheckInput, client: &EdgeClient) -> Result<Healthcheck, EdgeClientError> {
    let number = input.version.service_version.to_string();
    client.send_json(Method::POST, &input.version.path(&number, &[RESOURCE]), &input.fields)
}

pub fn delete(target: &NamedRef, client: &EdgeClient) -> Result<(), EdgeClientError> {
    let number = target.version.service_version.to_string();
    client.delete(&target.version.path(&number, &[RESOURCE, target.name.as_str()]))
}

pub fn get(target: &NamedRef, client: &EdgeClient) -> Result<Healthcheck, EdgeClientError> {
    let number = target.version.service_version.to_string();
    client.get(&target.version.path(&number, &[RESOURCE, target.name.as_str()]), &[])
}

pub fn list(version: &VersionRef, client: &EdgeClient) -> Result<Vec<Healthcheck>, EdgeClientError> {
    let number = version.service_version.to_string();
    client.get(&version.path(&number, &[RESOURCE]), &[])
}

pub fn update(input: &UpdateHealthcheckInput, client: &EdgeClient) -> Result<Healthcheck, EdgeClientError> {
    let target = &input.target;
    let number = target.version.service_version.to_string();
    client.send_json(
        Method::PUT,
        &target.version.path(&number, &[RESOURCE, target.name.as_str()]),
        &input.fields,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocking::client_for;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn create_only_sends_set_fields() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/service/abc/version/1/healthcheck")
                .json_body(json!({ "name": "ping", "timeout": 0 }));
            then.status(200).json_body(json!({
                "service_id": "abc",
                "service_version": 1,
                "name": "ping",
                "timeout": 0
            }));
        });
        let client = client_for(&server);
        let input = CreateHealthcheckInput {
            version: VersionRef::new("abc", 1),
            fields: HealthcheckFields {
                name: Some("ping".to_string()),
                timeout: Some(0),
                ..Default::default()
            },
        };
        let healthcheck = create(&input, &client).unwrap();
        mock.assert();
        assert_eq!(healthcheck.timeout, Some(0));
        assert_eq!(healthcheck.host, None);
    }

    #[test]
    fn update_renames_through_the_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/service/abc/version/2/healthcheck/old")
                .json_body(json!({ "name": "new" }));
            then.status(200).json_body(json!({ "name": "new" }));
        });
        let client = client_for(&server);
        let input = UpdateHealthcheckInput {
            target: NamedRef::new("abc", 2, "old"),
            fields: HealthcheckFields {
                name: Some("new".to_string()),
                ..Default::default()
            },
        };
        assert_eq!(update(&input, &client).unwrap().name, "new");
        mock.assert();
    }

    #[test]
    fn delete_targets_the_named_healthcheck() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(DELETE).path("/service/abc/version/2/healthcheck/ping");
            then.status(200).json_body(json!({ "status": "ok" }));
        });
        let client = client_for(&server);
        delete(&NamedRef::new("abc", 2, "ping"), &client).unwrap();
        mock.assert();
    }
}
