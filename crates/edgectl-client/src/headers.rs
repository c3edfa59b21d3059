use crate::EdgeClientError;
use houston::Credential;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};

const JSON_CONTENT_TYPE: &str = "application/json";
const CLIENT_NAME: &str = "edgectl";

/// The header carrying the API token.
pub const TOKEN_HEADER: &str = "Edge-Key";

/// Builds the default [HeaderMap] sent with every control plane request.
///
/// The token is marked sensitive so it never shows up in debug output.
pub fn build_api_headers(
    credential: &Credential,
    client_version: &str,
) -> Result<HeaderMap, EdgeClientError> {
    let mut headers = HeaderMap::new();

    headers.insert(ACCEPT, HeaderValue::from_str(JSON_CONTENT_TYPE)?);

    tracing::debug!(?client_version);
    let user_agent = HeaderValue::from_str(&format!("{CLIENT_NAME}/{client_version}"))?;
    headers.insert(USER_AGENT, user_agent);

    let mut token = HeaderValue::from_str(&credential.api_token)?;
    token.set_sensitive(true);
    headers.insert(TOKEN_HEADER, token);

    Ok(headers)
}
