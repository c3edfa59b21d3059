use thiserror::Error;

/// EdgeClientError represents all possible failures that can occur during a client request.
#[derive(Error, Debug)]
pub enum EdgeClientError {
    /// Tried to build a [HeaderMap](reqwest::header::HeaderMap) with an invalid header value.
    #[error("invalid header value")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// The configured endpoint could not be turned into a request URL.
    #[error("invalid API endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// The endpoint as configured.
        endpoint: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Encountered an error handling the received response.
    #[error("encountered an error handling the response: {msg}")]
    HandleResponse {
        /// The error message.
        msg: String,
    },

    /// Encountered an error sending the request.
    #[error("encountered an error while sending a request")]
    SendRequest(#[from] reqwest::Error),

    /// The API rejected the token.
    #[error("the API token was rejected (HTTP {status})")]
    Unauthorized {
        /// The HTTP status code.
        status: u16,
    },

    /// The API could not find the requested resource.
    #[error("{detail}")]
    NotFound {
        /// The message returned by the API.
        detail: String,
    },

    /// Any other non-success status returned by the API.
    #[error("the API responded with HTTP {status}: {detail}")]
    Api {
        /// The HTTP status code.
        status: u16,
        /// The message returned by the API.
        detail: String,
    },

    /// No service exists with the given name.
    #[error("could not find a service named '{name}'")]
    ServiceNotFound {
        /// The name that was searched for.
        name: String,
    },

    /// A local file needed for the request could not be read.
    #[error("could not read '{path}'")]
    ReadFile {
        /// The file path.
        path: String,
        /// The underlying error.
        source: std::io::Error,
    },
}
