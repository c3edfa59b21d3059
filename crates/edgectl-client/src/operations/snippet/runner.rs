use reqwest::Method;

use crate::blocking::EdgeClient;
use crate::operations::snippet::types::*;
use crate::shared::{NamedRef, VersionRef};
use crate::EdgeClientError;

const RESOURCE: &str = "snippet";

pub fn create(input: &CreateSnippetInput, client: &EdgeClient) -> Result<Snippet, EdgeClientError> {
    let number = input.version.service_version.to_string();
    client.send_json(Method::POST, &input.version.path(&number, &[RESOURCE]), &input.fields)
}

pub fn delete(target: &NamedRef, client: &EdgeClient) -> Result<(), EdgeClientError> {
    let number = target.version.service_version.to_string();
    client.delete(&target.version.path(&number, &[RESOURCE, target.name.as_str()]))
}

pub fn get(target: &NamedRef, client: &EdgeClient) -> Result<Snippet, EdgeClientError> {
    let number = target.version.service_version.to_string();
    client.get(&target.version.path(&number, &[RESOURCE, target.name.as_str()]), &[])
}

pub fn get_dynamic(service_id: &str, snippet_id: &str, client: &EdgeClient) -> Result<Snippet, EdgeClientError> {
    client.get(&["service", service_id, RESOURCE, snippet_id], &[])
}

pub fn list(version: &VersionRef, client: &EdgeClient) -> Result<Vec<Snippet>, EdgeClientError> {
    let number = version.service_version.to_string();
    client.get(&version.path(&number, &[RESOURCE]), &[])
}

pub fn update(input: &UpdateSnippetInput, client: &EdgeClient) -> Result<Snippet, EdgeClientError> {
    let target = &input.target;
    let number = target.version.service_version.to_string();
    client.send_json(
        Method::PUT,
        &target.version.path(&number, &[RESOURCE, target.name.as_str()]),
        &input.fields,
    )
}

pub fn update_dynamic(
    input: &UpdateDynamicSnippetInput,
    client: &EdgeClient,
) -> Result<Snippet, EdgeClientError> {
    client.send_json(
        Method::PUT,
        &["service", input.service_id.as_str(), RESOURCE, input.snippet_id.as_str()],
        input,
    )
}
