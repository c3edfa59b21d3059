use reqwest::Method;

use crate::blocking::EdgeClient;
use crate::operations::tls_activation::types::*;
use crate::EdgeClientError;

const TLS: &str = "tls";
const RESOURCE: &str = "activations";

pub fn create(
    input: &CreateTlsActivationInput,
    client: &EdgeClient,
) -> Result<TlsActivation, EdgeClientError> {
    client.send_json(Method::POST, &[TLS, RESOURCE], input)
}

pub fn delete(id: &str, client: &EdgeClient) -> Result<(), EdgeClientError> {
    client.delete(&[TLS, RESOURCE, id])
}

pub fn get(id: &str, include: Option<TlsInclude>, client: &EdgeClient) -> Result<TlsActivation, EdgeClientError> {
    let include = include.map(|i| i.to_string());
    let query: Vec<(&str, &str)> = include.iter().map(|i| ("include", i.as_str())).collect();
    client.get(&[TLS, RESOURCE, id], &query)
}

pub fn list(
    input: &ListTlsActivationsInput,
    client: &EdgeClient,
) -> Result<Vec<TlsActivation>, EdgeClientError> {
    let include = input.include.map(|i| i.to_string());
    let page = input.page.map(|p| p.to_string());
    let per_page = input.per_page.map(|p| p.to_string());
    let params = [
        ("filter[tls_certificate.id]", input.filter_certificate_id.as_deref()),
        ("filter[tls_configuration.id]", input.filter_configuration_id.as_deref()),
        ("filter[tls_domain.id]", input.filter_domain_id.as_deref()),
        ("include", include.as_deref()),
        ("page[number]", page.as_deref()),
        ("page[size]", per_page.as_deref()),
    ];
    let query: Vec<(&str, &str)> = params
        .iter()
        .filter_map(|(key, value)| value.map(|v| (*key, v)))
        .collect();
    client.get(&[TLS, RESOURCE], &query)
}

pub fn update(
    input: &UpdateTlsActivationInput,
    client: &EdgeClient,
) -> Result<TlsActivation, EdgeClientError> {
    client.send_json(Method::PATCH, &[TLS, RESOURCE, input.id.as_str()], input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocking::client_for;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn describe_passes_include() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/tls/activations/act1")
                .query_param("include", "tls_domain");
            then.status(200).json_body(json!({
                "id": "act1",
                "created_at": "2021-06-15T23:00:00Z"
            }));
        });
        let client = client_for(&server);
        let activation = get("act1", Some(TlsInclude::TlsDomain), &client).unwrap();
        mock.assert();
        assert_eq!(
            activation.timestamps.created_at.as_deref(),
            Some("2021-06-15T23:00:00Z")
        );
    }

    #[test]
    fn list_only_sends_set_filters() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/tls/activations")
                .query_param("filter[tls_domain.id]", "example.com");
            then.status(200).json_body(json!([{ "id": "a" }]));
        });
        let client = client_for(&server);
        let input = ListTlsActivationsInput {
            filter_domain_id: Some("example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(list(&input, &client).unwrap().len(), 1);
        mock.assert();
    }
}
