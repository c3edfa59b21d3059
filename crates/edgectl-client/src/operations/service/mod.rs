mod runner;
mod types;

pub use runner::{
    activate_version, clone_version, create_domain, create_service, list_domains, list_versions,
    search_service, update_version, upload_package,
};
pub use types::*;
