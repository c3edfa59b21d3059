//! HTTP client for the control plane API used by the edgectl CLI tool.

/// Module related to blocking http client.
pub mod blocking;
mod error;

/// Module related to constructing request headers.
pub mod headers;

/// The `EdgeApi` trait: one method per remote operation.
mod api;

/// Module for client related errors.
pub use error::EdgeClientError;

pub use api::EdgeApi;
#[cfg(any(test, feature = "testing"))]
pub use api::MockEdgeApi;

/// Typed inputs and outputs for each API resource.
pub mod operations;

/// Types shared by several operations.
pub mod shared;
