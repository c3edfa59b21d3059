use reqwest::Method;

use crate::blocking::EdgeClient;
use crate::operations::service_authorization::types::*;
use crate::EdgeClientError;

const RESOURCE: &str = "service-authorizations";

pub fn create(
    input: &CreateServiceAuthorizationInput,
    client: &EdgeClient,
) -> Result<ServiceAuthorization, EdgeClientError> {
    client.send_json(Method::POST, &[RESOURCE], input)
}

pub fn delete(id: &str, client: &EdgeClient) -> Result<(), EdgeClientError> {
    client.delete(&[RESOURCE, id])
}

pub fn get(id: &str, client: &EdgeClient) -> Result<ServiceAuthorization, EdgeClientError> {
    client.get(&[RESOURCE, id], &[])
}

/// Lists authorizations one page at a time.
pub fn list(
    page: Option<u32>,
    per_page: Option<u32>,
    client: &EdgeClient,
) -> Result<Vec<ServiceAuthorization>, EdgeClientError> {
    let page = page.map(|p| p.to_string());
    let per_page = per_page.map(|p| p.to_string());
    let mut query = Vec::new();
    if let Some(page) = &page {
        query.push(("page[number]", page.as_str()));
    }
    if let Some(per_page) = &per_page {
        query.push(("page[size]", per_page.as_str()));
    }
    client.get(&[RESOURCE], &query)
}

pub fn update(
    input: &UpdateServiceAuthorizationInput,
    client: &EdgeClient,
) -> Result<ServiceAuthorization, EdgeClientError> {
    client.send_json(Method::PATCH, &[RESOURCE, input.id.as_str()], input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocking::client_for;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn permissions_use_snake_case() {
        assert_eq!(Permission::PurgeSelect.to_string(), "purge_select");
        assert_eq!(Permission::from_str("read_only").unwrap(), Permission::ReadOnly);
        assert!(Permission::from_str("admin").is_err());
    }

    #[test]
    fn update_patches_the_permission() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PATCH)
                .path("/service-authorizations/sa1")
                .json_body(json!({ "permission": "purge_all" }));
            then.status(200).json_body(json!({
                "id": "sa1",
                "service_id": "abc",
                "user_id": "u1",
                "permission": "purge_all"
            }));
        });
        let client = client_for(&server);
        let input = UpdateServiceAuthorizationInput {
            id: "sa1".to_string(),
            permission: Permission::PurgeAll,
        };
        let auth = update(&input, &client).unwrap();
        mock.assert();
        assert_eq!(auth.permission, Permission::PurgeAll);
    }

    #[test]
    fn list_passes_paging() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/service-authorizations")
                .query_param("page[number]", "2")
                .query_param("page[size]", "10");
            then.status(200).json_body(json!([]));
        });
        let client = client_for(&server);
        assert!(list(Some(2), Some(10), &client).unwrap().is_empty());
        mock.assert();
    }
}
