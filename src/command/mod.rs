mod compute;
mod config;
mod config_store_entry;
mod dictionary;
mod dictionary_entry;
mod explain;
mod healthcheck;
mod logging;
pub(crate) mod output;
mod service_auth;
pub(crate) mod target;
mod tls_custom;
mod vcl;

pub use compute::Compute;
pub use config::Config;
pub use config_store_entry::ConfigStoreEntry;
pub use dictionary::Dictionary;
pub use dictionary_entry::DictionaryEntry;
pub use explain::Explain;
pub use healthcheck::Healthcheck;
pub use logging::Logging;
pub use service_auth::ServiceAuth;
pub use tls_custom::TlsCustom;
pub use vcl::Vcl;
