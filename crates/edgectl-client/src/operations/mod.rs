/// Services, versions, domains and packages.
pub mod service;

/// Health checks on a service version.
pub mod healthcheck;

/// Dictionaries on a service version.
pub mod dictionary;

/// Items stored in a dictionary.
pub mod dictionary_item;

pub mod config_store_item;

pub mod service_authorization;

/// Custom certificate activations.
pub mod tls_activation;

/// VCL snippets, versioned and dynamic.
pub mod snippet;

/// Logging endpoints for every supported provider.
pub mod logging;
