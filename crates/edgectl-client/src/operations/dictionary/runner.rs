use reqwest::Method;

use crate::blocking::EdgeClient;
use crate::operations::dictionary::types::*;
use crate::shared::{NamedRef, VersionRef};
use crate::EdgeClientError;

const RESOURCE: &str = "dictionary";

pub fn create(input: &CreateDictionaryInput, client: &EdgeClient) -> Result<Dictionary, EdgeClientError> {
    let number = input.version.service_version.to_string();
    client.send_json(Method::POST, &input.version.path(&number, &[RESOURCE]), &input.fields)
}

pub fn delete(target: &NamedRef, client: &EdgeClient) -> Result<(), EdgeClientError> {
    let number = target.version.service_version.to_string();
    client.delete(&target.version.path(&number, &[RESOURCE, target.name.as_str()]))
}

pub fn get(target: &NamedRef, client: &EdgeClient) -> Result<Dictionary, EdgeClientError> {
    let number = target.version.service_version.to_string();
    client.get(&target.version.path(&number, &[RESOURCE, target.name.as_str()]), &[])
}

pub fn list(version: &VersionRef, client: &EdgeClient) -> Result<Vec<Dictionary>, EdgeClientError> {
    let number = version.service_version.to_string();
    client.get(&version.path(&number, &[RESOURCE]), &[])
}

pub fn update(input: &UpdateDictionaryInput, client: &EdgeClient) -> Result<Dictionary, EdgeClientError> {
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
    use serde_json::json;

    #[test]
    fn create_posts_to_the_version() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/service/abc/version/4/dictionary")
                .json_body(json!({ "name": "geo", "write_only": true }));
            then.status(200).json_body(json!({
                "id": "d1",
                "service_id": "abc",
                "service_version": 4,
                "name": "geo",
                "write_only": true
            }));
        });
        let client = client_for(&server);
        let input = CreateDictionaryInput {
            version: VersionRef::new("abc", 4),
            fields: DictionaryFields {
                name: Some("geo".to_string()),
                write_only: Some(true),
            },
        };
        let dictionary = create(&input, &client).unwrap();
        mock.assert();
        assert_eq!(dictionary.id, "d1");
        assert!(dictionary.write_only);
    }

    #[test]
    fn list_returns_every_dictionary() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/service/abc/version/4/dictionary");
            then.status(200).json_body(json!([
                { "id": "d1", "name": "a" },
                { "id": "d2", "name": "b" }
            ]));
        });
        let client = client_for(&server);
        let dictionaries = list(&VersionRef::new("abc", 4), &client).unwrap();
        assert_eq!(dictionaries.len(), 2);
        assert_eq!(dictionaries[1].name, "b");
    }
}
