use crate::{headers, EdgeClientError};

use houston::Credential;
use reqwest::blocking::{multipart, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(60);

/// Represents a blocking client for the control plane REST API.
#[derive(Debug)]
pub struct EdgeClient {
    client: reqwest::blocking::Client,
    base_url: Url,
}

/// The error document returned by the API on failure.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    detail: Option<String>,
}

impl EdgeClient {
    /// Construct a new [EdgeClient] for `endpoint`, authenticating every
    /// request with `credential`.
    pub fn new(
        endpoint: &str,
        credential: &Credential,
        client_version: &str,
    ) -> Result<EdgeClient, EdgeClientError> {
        let base_url = Url::parse(endpoint).map_err(|e| EdgeClientError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(EdgeClientError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: "the endpoint cannot be used as a base URL".to_string(),
            });
        }
        let client = reqwest::blocking::Client::builder()
            .default_headers(headers::build_api_headers(credential, client_version)?)
            .timeout(TIMEOUT)
            .build()?;
        Ok(EdgeClient { client, base_url })
    }

    /// Joins percent-encoded path `segments` onto the base URL.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, EdgeClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| EdgeClientError::InvalidEndpoint {
                endpoint: self.base_url.to_string(),
                reason: "the endpoint cannot be used as a base URL".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, EdgeClientError> {
        let url = self.url(segments)?;
        tracing::trace!(%method, %url, "sending request");
        Ok(self.client.request(method, url))
    }

    /// Sends a GET request and decodes the JSON response.
    pub(crate) fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, EdgeClientError> {
        let mut url = self.url(segments)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        tracing::trace!(%url, "sending request");
        let response = self.client.get(url).send()?;
        EdgeClient::handle_response(response)
    }

    /// Sends `body` as JSON with the given method and decodes the JSON response.
    pub(crate) fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, EdgeClientError> {
        let response = self.request(method, segments)?.json(body).send()?;
        EdgeClient::handle_response(response)
    }

    /// Sends a bodyless request (e.g. cloning or activating a version).
    pub(crate) fn send_empty<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<T, EdgeClientError> {
        let response = self.request(method, segments)?.send()?;
        EdgeClient::handle_response(response)
    }

    /// Sends a DELETE request, discarding any response body.
    pub(crate) fn delete(&self, segments: &[&str]) -> Result<(), EdgeClientError> {
        let response = self.request(Method::DELETE, segments)?.send()?;
        EdgeClient::check_status(response)?;
        Ok(())
    }

    /// Uploads `bytes` as a multipart form field named `package`.
    pub(crate) fn upload<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<T, EdgeClientError> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/gzip")?;
        let form = multipart::Form::new().part("package", part);
        let response = self.request(Method::PUT, segments)?.multipart(form).send()?;
        EdgeClient::handle_response(response)
    }

    fn check_status(response: Response) -> Result<Response, EdgeClientError> {
        let status = response.status();
        tracing::trace!(%status, "received response");
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        let detail = match (body.msg, body.detail) {
            (Some(msg), Some(detail)) => format!("{msg}: {detail}"),
            (Some(msg), None) | (None, Some(msg)) => msg,
            (None, None) if !text.trim().is_empty() => text.trim().to_string(),
            (None, None) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => EdgeClientError::Unauthorized {
                status: status.as_u16(),
            },
            StatusCode::NOT_FOUND => EdgeClientError::NotFound { detail },
            _ => EdgeClientError::Api {
                status: status.as_u16(),
                detail,
            },
        })
    }

    /// Checks the status code, then parses the JSON response body.
    pub fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, EdgeClientError> {
        let response = EdgeClient::check_status(response)?;
        let text = response.text()?;
        serde_json::from_str(&text).map_err(|e| EdgeClientError::HandleResponse {
            msg: format!("failed to parse response JSON: {e}"),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use houston::CredentialOrigin;
    use httpmock::prelude::*;
    use serde_json::json;
    use speculoos::prelude::*;

    pub(crate) fn client_for(server: &MockServer) -> EdgeClient {
        let credential = Credential {
            api_token: "token".to_string(),
            origin: CredentialOrigin::EnvVar,
        };
        EdgeClient::new(&server.base_url(), &credential, "0.0.0").unwrap()
    }

    #[test]
    fn url_segments_are_percent_encoded() {
        let credential = Credential {
            api_token: "token".to_string(),
            origin: CredentialOrigin::EnvVar,
        };
        let client = EdgeClient::new("https://api.example.com/v1/", &credential, "0.0.0").unwrap();
        let url = client.url(&["service", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/service/a%20b%2Fc");
    }

    #[test]
    fn rejects_unusable_endpoints() {
        let credential = Credential {
            api_token: "token".to_string(),
            origin: CredentialOrigin::EnvVar,
        };
        assert!(matches!(
            EdgeClient::new("mailto:nobody", &credential, "0.0.0"),
            Err(EdgeClientError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn sends_the_token_header() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/ping")
                .header(headers::TOKEN_HEADER, "token");
            then.status(200).json_body(json!({ "ok": true }));
        });
        let client = client_for(&server);
        let body: serde_json::Value = client.get(&["ping"], &[]).unwrap();
        mock.assert();
        assert_that!(body["ok"].as_bool()).is_equal_to(Some(true));
    }

    #[test]
    fn maps_error_statuses() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404)
                .json_body(json!({ "msg": "Record not found", "detail": "no such thing" }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/denied");
            then.status(401).body("");
        });
        server.mock(|when, then| {
            when.method(GET).path("/broken");
            then.status(500).body("boom");
        });
        let client = client_for(&server);

        let err = client.get::<serde_json::Value>(&["missing"], &[]).unwrap_err();
        assert!(
            matches!(err, EdgeClientError::NotFound { ref detail } if detail == "Record not found: no such thing")
        );

        let err = client.get::<serde_json::Value>(&["denied"], &[]).unwrap_err();
        assert!(matches!(err, EdgeClientError::Unauthorized { status: 401 }));

        let err = client.get::<serde_json::Value>(&["broken"], &[]).unwrap_err();
        assert!(
            matches!(err, EdgeClientError::Api { status: 500, ref detail } if detail == "boom")
        );
    }

    #[test]
    fn invalid_json_is_a_handle_response_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/garbage");
            then.status(200).body("not json");
        });
        let client = client_for(&server);
        let err = client.get::<serde_json::Value>(&["garbage"], &[]).unwrap_err();
        assert!(matches!(err, EdgeClientError::HandleResponse { .. }));
    }
}
