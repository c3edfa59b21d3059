use reqwest::Method;
use serde::Serialize;

use crate::blocking::EdgeClient;
use crate::operations::logging::types::*;
use crate::shared::{NamedRef, VersionRef};
use crate::EdgeClientError;

const LOGGING: &str = "logging";

#[derive(Serialize)]
struct Body<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(flatten)]
    settings: &'a LoggingSettings,
}

pub fn create(input: &CreateLoggingInput, client: &EdgeClient) -> Result<LoggingEndpoint, EdgeClientError> {
    let number = input.version.service_version.to_string();
    let body = Body {
        name: Some(&input.name),
        settings: &input.settings,
    };
    client.send_json(
        Method::POST,
        &input.version.path(&number, &[LOGGING, input.kind.slug()]),
        &body,
    )
}

pub fn delete(kind: LoggingKind, target: &NamedRef, client: &EdgeClient) -> Result<(), EdgeClientError> {
    let number = target.version.service_version.to_string();
    client.delete(&target.version.path(&number, &[LOGGING, kind.slug(), target.name.as_str()]))
}

pub fn get(kind: LoggingKind, target: &NamedRef, client: &EdgeClient) -> Result<LoggingEndpoint, EdgeClientError> {
    let number = target.version.service_version.to_string();
    client.get(
        &target.version.path(&number, &[LOGGING, kind.slug(), target.name.as_str()]),
        &[],
    )
}

pub fn list(
    kind: LoggingKind,
    version: &VersionRef,
    client: &EdgeClient,
) -> Result<Vec<LoggingEndpoint>, EdgeClientError> {
    let number = version.service_version.to_string();
    client.get(&version.path(&number, &[LOGGING, kind.slug()]), &[])
}

pub fn update(input: &UpdateLoggingInput, client: &EdgeClient) -> Result<LoggingEndpoint, EdgeClientError> {
    let target = &input.target;
    let number = target.version.service_version.to_string();
    let body = Body {
        name: input.new_name.as_deref(),
        settings: &input.settings,
    };
    client.send_json(
        Method::PUT,
        &target.version.path(&number, &[LOGGING, input.kind.slug(), target.name.as_str()]),
        &body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocking::client_for;
    use httpmock::prelude::*;
    use rstest::rstest;
    use serde_json::json;
    use std::str::FromStr;

    #[rstest]
    #[case::azureblob(LoggingKind::AzureBlob, "azureblob")]
    #[case::cloudfiles(LoggingKind::Cloudfiles, "cloudfiles")]
    #[case::datadog(LoggingKind::Datadog, "datadog")]
    #[case::newrelic(LoggingKind::NewRelic, "newrelic")]
    #[case::s3(LoggingKind::S3, "s3")]
    #[case::sftp(LoggingKind::Sftp, "sftp")]
    fn slugs_round_trip(#[case] kind: LoggingKind, #[case] slug: &str) {
        assert_eq!(kind.slug(), slug);
        assert_eq!(LoggingKind::from_str(slug).unwrap(), kind);
    }

    #[test]
    fn create_flattens_settings_into_the_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/service/abc/version/1/logging/datadog")
                .json_body(json!({ "name": "dd", "token": "t", "region": "EU" }));
            then.status(200).json_body(json!({
                "service_id": "abc",
                "service_version": 1,
                "name": "dd",
                "token": "t",
                "region": "EU"
            }));
        });
        let client = client_for(&server);
        let input = CreateLoggingInput {
            kind: LoggingKind::Datadog,
            version: VersionRef::new("abc", 1),
            name: "dd".to_string(),
            settings: LoggingSettings {
                token: Some("t".to_string()),
                region: Some("EU".to_string()),
                ..Default::default()
            },
        };
        let endpoint = create(&input, &client).unwrap();
        mock.assert();
        assert_eq!(endpoint.settings.region.as_deref(), Some("EU"));
    }

    #[test]
    fn update_without_rename_omits_the_name() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/service/abc/version/2/logging/azureblob/logs")
                .json_body(json!({ "container": "c", "gzip_level": 0 }));
            then.status(200).json_body(json!({ "name": "logs", "container": "c" }));
        });
        let client = client_for(&server);
        let input = UpdateLoggingInput {
            kind: LoggingKind::AzureBlob,
            target: NamedRef::new("abc", 2, "logs"),
            new_name: None,
            settings: LoggingSettings {
                container: Some("c".to_string()),
                gzip_level: Some(0),
                ..Default::default()
            },
        };
        update(&input, &client).unwrap();
        mock.assert();
    }
}
