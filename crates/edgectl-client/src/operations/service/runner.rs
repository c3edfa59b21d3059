use reqwest::Method;

use crate::blocking::EdgeClient;
use crate::operations::service::types::*;
use crate::shared::VersionRef;
use crate::EdgeClientError;

/// Looks a service up by its exact name.
pub fn search_service(name: &str, client: &EdgeClient) -> Result<Service, EdgeClientError> {
    client
        .get(&["service", "search"], &[("name", name)])
        .map_err(|e| match e {
            EdgeClientError::NotFound { .. } => EdgeClientError::ServiceNotFound {
                name: name.to_string(),
            },
            e => e,
        })
}

pub fn list_versions(service_id: &str, client: &EdgeClient) -> Result<Vec<Version>, EdgeClientError> {
    client.get(&["service", service_id, "version"], &[])
}

pub fn clone_version(version: &VersionRef, client: &EdgeClient) -> Result<Version, EdgeClientError> {
    let number = version.service_version.to_string();
    client.send_empty(Method::PUT, &version.path(&number, &["clone"]))
}

pub fn activate_version(version: &VersionRef, client: &EdgeClient) -> Result<Version, EdgeClientError> {
    let number = version.service_version.to_string();
    client.send_empty(Method::PUT, &version.path(&number, &["activate"]))
}

pub fn update_version(input: &UpdateVersionInput, client: &EdgeClient) -> Result<Version, EdgeClientError> {
    let number = input.version.service_version.to_string();
    client.send_json(Method::PUT, &input.version.path(&number, &[]), input)
}

pub fn create_service(input: &CreateServiceInput, client: &EdgeClient) -> Result<Service, EdgeClientError> {
    client.send_json(Method::POST, &["service"], input)
}

pub fn create_domain(input: &CreateDomainInput, client: &EdgeClient) -> Result<Domain, EdgeClientError> {
    let number = input.version.service_version.to_string();
    client.send_json(Method::POST, &input.version.path(&number, &["domain"]), input)
}

pub fn list_domains(version: &VersionRef, client: &EdgeClient) -> Result<Vec<Domain>, EdgeClientError> {
    let number = version.service_version.to_string();
    client.get(&version.path(&number, &["domain"]), &[])
}

/// Uploads a package archive read from disk.
pub fn upload_package(input: &UploadPackageInput, client: &EdgeClient) -> Result<Package, EdgeClientError> {
    let bytes = std::fs::read(&input.path).map_err(|source| EdgeClientError::ReadFile {
        path: input.path.to_string(),
        source,
    })?;
    let file_name = input.path.file_name().unwrap_or("package.tar.gz");
    tracing::debug!(size = bytes.len(), file_name, "uploading package");
    let number = input.version.service_version.to_string();
    client.upload(&input.version.path(&number, &["package"]), file_name, bytes)
}
