use crate::blocking::EdgeClient;
use crate::operations::{
    config_store_item::{self, ConfigStoreItem, CreateConfigStoreItemInput, UpdateConfigStoreItemInput},
    dictionary::{self, CreateDictionaryInput, Dictionary, UpdateDictionaryInput},
    dictionary_item::{
        self, BatchModifyDictionaryItemsInput, CreateDictionaryItemInput, DictionaryItem, DictionaryRef,
        UpdateDictionaryItemInput,
    },
    healthcheck::{self, CreateHealthcheckInput, Healthcheck, UpdateHealthcheckInput},
    logging::{self, CreateLoggingInput, LoggingEndpoint, LoggingKind, UpdateLoggingInput},
    service::{
        self, CreateDomainInput, CreateServiceInput, Domain, Package, Service, UpdateVersionInput,
        UploadPackageInput, Version,
    },
    service_authorization::{
        self, CreateServiceAuthorizationInput, ServiceAuthorization, UpdateServiceAuthorizationInput,
    },
    snippet::{self, CreateSnippetInput, Snippet, UpdateDynamicSnippetInput, UpdateSnippetInput},
    tls_activation::{
        self, CreateTlsActivationInput, ListTlsActivationsInput, TlsActivation, TlsInclude,
        UpdateTlsActivationInput,
    },
};
use crate::shared::{NamedRef, VersionRef};
use crate::EdgeClientError;

type Result<T> = std::result::Result<T, EdgeClientError>;

/// Every remote operation the CLI performs against the control plane.
///
/// Commands only ever see this trait, so tests can substitute a mock.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait EdgeApi {
    // services and versions
    fn search_service(&self, name: &str) -> Result<Service>;
    fn list_versions(&self, service_id: &str) -> Result<Vec<Version>>;
    fn clone_version(&self, version: &VersionRef) -> Result<Version>;
    fn activate_version(&self, version: &VersionRef) -> Result<Version>;
    fn update_version(&self, input: &UpdateVersionInput) -> Result<Version>;
    fn create_service(&self, input: &CreateServiceInput) -> Result<Service>;
    fn create_domain(&self, input: &CreateDomainInput) -> Result<Domain>;
    fn list_domains(&self, version: &VersionRef) -> Result<Vec<Domain>>;
    fn upload_package(&self, input: &UploadPackageInput) -> Result<Package>;

    // health checks
    fn create_healthcheck(&self, input: &CreateHealthcheckInput) -> Result<Healthcheck>;
    fn delete_healthcheck(&self, target: &NamedRef) -> Result<()>;
    fn get_healthcheck(&self, target: &NamedRef) -> Result<Healthcheck>;
    fn list_healthchecks(&self, version: &VersionRef) -> Result<Vec<Healthcheck>>;
    fn update_healthcheck(&self, input: &UpdateHealthcheckInput) -> Result<Healthcheck>;

    // dictionaries
    fn create_dictionary(&self, input: &CreateDictionaryInput) -> Result<Dictionary>;
    fn delete_dictionary(&self, target: &NamedRef) -> Result<()>;
    fn get_dictionary(&self, target: &NamedRef) -> Result<Dictionary>;
    fn list_dictionaries(&self, version: &VersionRef) -> Result<Vec<Dictionary>>;
    fn update_dictionary(&self, input: &UpdateDictionaryInput) -> Result<Dictionary>;

    // dictionary items
    fn create_dictionary_item(&self, input: &CreateDictionaryItemInput) -> Result<DictionaryItem>;
    fn delete_dictionary_item(&self, dictionary: &DictionaryRef, item_key: &str) -> Result<()>;
    fn get_dictionary_item(&self, dictionary: &DictionaryRef, item_key: &str) -> Result<DictionaryItem>;
    fn list_dictionary_items(&self, dictionary: &DictionaryRef) -> Result<Vec<DictionaryItem>>;
    fn update_dictionary_item(&self, input: &UpdateDictionaryItemInput) -> Result<DictionaryItem>;
    fn batch_modify_dictionary_items(&self, input: &BatchModifyDictionaryItemsInput) -> Result<()>;

    // config store items
    fn create_config_store_item(&self, input: &CreateConfigStoreItemInput) -> Result<ConfigStoreItem>;
    fn delete_config_store_item(&self, store_id: &str, key: &str) -> Result<()>;
    fn get_config_store_item(&self, store_id: &str, key: &str) -> Result<ConfigStoreItem>;
    fn list_config_store_items(&self, store_id: &str) -> Result<Vec<ConfigStoreItem>>;
    fn update_config_store_item(&self, input: &UpdateConfigStoreItemInput) -> Result<ConfigStoreItem>;

    // service authorizations
    fn create_service_authorization(
        &self,
        input: &CreateServiceAuthorizationInput,
    ) -> Result<ServiceAuthorization>;
    fn delete_service_authorization(&self, id: &str) -> Result<()>;
    fn get_service_authorization(&self, id: &str) -> Result<ServiceAuthorization>;
    fn list_service_authorizations(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Vec<ServiceAuthorization>>;
    fn update_service_authorization(
        &self,
        input: &UpdateServiceAuthorizationInput,
    ) -> Result<ServiceAuthorization>;

    // tls activations
    fn create_tls_activation(&self, input: &CreateTlsActivationInput) -> Result<TlsActivation>;
    fn delete_tls_activation(&self, id: &str) -> Result<()>;
    fn get_tls_activation(&self, id: &str, include: Option<TlsInclude>) -> Result<TlsActivation>;
    fn list_tls_activations(&self, input: &ListTlsActivationsInput) -> Result<Vec<TlsActivation>>;
    fn update_tls_activation(&self, input: &UpdateTlsActivationInput) -> Result<TlsActivation>;

    // vcl snippets
    fn create_snippet(&self, input: &CreateSnippetInput) -> Result<Snippet>;
    fn delete_snippet(&self, target: &NamedRef) -> Result<()>;
    fn get_snippet(&self, target: &NamedRef) -> Result<Snippet>;
    fn get_dynamic_snippet(&self, service_id: &str, snippet_id: &str) -> Result<Snippet>;
    fn list_snippets(&self, version: &VersionRef) -> Result<Vec<Snippet>>;
    fn update_snippet(&self, input: &UpdateSnippetInput) -> Result<Snippet>;
    fn update_dynamic_snippet(&self, input: &UpdateDynamicSnippetInput) -> Result<Snippet>;

    // logging endpoints
    fn create_logging(&self, input: &CreateLoggingInput) -> Result<LoggingEndpoint>;
    fn delete_logging(&self, kind: LoggingKind, target: &NamedRef) -> Result<()>;
    fn get_logging(&self, kind: LoggingKind, target: &NamedRef) -> Result<LoggingEndpoint>;
    fn list_logging(&self, kind: LoggingKind, version: &VersionRef) -> Result<Vec<LoggingEndpoint>>;
    fn update_logging(&self, input: &UpdateLoggingInput) -> Result<LoggingEndpoint>;
}

impl EdgeApi for EdgeClient {
    fn search_service(&self, name: &str) -> Result<Service> {
        service::search_service(name, self)
    }
    fn list_versions(&self, service_id: &str) -> Result<Vec<Version>> {
        service::list_versions(service_id, self)
    }
    fn clone_version(&self, version: &VersionRef) -> Result<Version> {
        service::clone_version(version, self)
    }
    fn activate_version(&self, version: &VersionRef) -> Result<Version> {
        service::activate_version(version, self)
    }
    fn update_version(&self, input: &UpdateVersionInput) -> Result<Version> {
        service::update_version(input, self)
    }
    fn create_service(&self, input: &CreateServiceInput) -> Result<Service> {
        service::create_service(input, self)
    }
    fn create_domain(&self, input: &CreateDomainInput) -> Result<Domain> {
        service::create_domain(input, self)
    }
    fn list_domains(&self, version: &VersionRef) -> Result<Vec<Domain>> {
        service::list_domains(version, self)
    }
    fn upload_package(&self, input: &UploadPackageInput) -> Result<Package> {
        service::upload_package(input, self)
    }

    fn create_healthcheck(&self, input: &CreateHealthcheckInput) -> Result<Healthcheck> {
        healthcheck::create(input, self)
    }
    fn delete_healthcheck(&self, target: &NamedRef) -> Result<()> {
        healthcheck::delete(target, self)
    }
    fn get_healthcheck(&self, target: &NamedRef) -> Result<Healthcheck> {
        healthcheck::get(target, self)
    }
    fn list_healthchecks(&self, version: &VersionRef) -> Result<Vec<Healthcheck>> {
        healthcheck::list(version, self)
    }
    fn update_healthcheck(&self, input: &UpdateHealthcheckInput) -> Result<Healthcheck> {
        healthcheck::update(input, self)
    }

    fn create_dictionary(&self, input: &CreateDictionaryInput) -> Result<Dictionary> {
        dictionary::create(input, self)
    }
    fn delete_dictionary(&self, target: &NamedRef) -> Result<()> {
        dictionary::delete(target, self)
    }
    fn get_dictionary(&self, target: &NamedRef) -> Result<Dictionary> {
        dictionary::get(target, self)
    }
    fn list_dictionaries(&self, version: &VersionRef) -> Result<Vec<Dictionary>> {
        dictionary::list(version, self)
    }
    fn update_dictionary(&self, input: &UpdateDictionaryInput) -> Result<Dictionary> {
        dictionary::update(input, self)
    }

    fn create_dictionary_item(&self, input: &CreateDictionaryItemInput) -> Result<DictionaryItem> {
        dictionary_item::create(input, self)
    }
    fn delete_dictionary_item(&self, dictionary: &DictionaryRef, item_key: &str) -> Result<()> {
        dictionary_item::delete(dictionary, item_key, self)
    }
    fn get_dictionary_item(&self, dictionary: &DictionaryRef, item_key: &str) -> Result<DictionaryItem> {
        dictionary_item::get(dictionary, item_key, self)
    }
    fn list_dictionary_items(&self, dictionary: &DictionaryRef) -> Result<Vec<DictionaryItem>> {
        dictionary_item::list(dictionary, self)
    }
    fn update_dictionary_item(&self, input: &UpdateDictionaryItemInput) -> Result<DictionaryItem> {
        dictionary_item::update(input, self)
    }
    fn batch_modify_dictionary_items(&self, input: &BatchModifyDictionaryItemsInput) -> Result<()> {
        dictionary_item::batch_modify(input, self)
    }

    fn create_config_store_item(&self, input: &CreateConfigStoreItemInput) -> Result<ConfigStoreItem> {
        config_store_item::create(input, self)
    }
    fn delete_config_store_item(&self, store_id: &str, key: &str) -> Result<()> {
        config_store_item::delete(store_id, key, self)
    }
    fn get_config_store_item(&self, store_id: &str, key: &str) -> Result<ConfigStoreItem> {
        config_store_item::get(store_id, key, self)
    }
    fn list_config_store_items(&self, store_id: &str) -> Result<Vec<ConfigStoreItem>> {
        config_store_item::list(store_id, self)
    }
    fn update_config_store_item(&self, input: &UpdateConfigStoreItemInput) -> Result<ConfigStoreItem> {
        config_store_item::update(input, self)
    }

    fn create_service_authorization(
        &self,
        input: &CreateServiceAuthorizationInput,
    ) -> Result<ServiceAuthorization> {
        service_authorization::create(input, self)
    }
    fn delete_service_authorization(&self, id: &str) -> Result<()> {
        service_authorization::delete(id, self)
    }
    fn get_service_authorization(&self, id: &str) -> Result<ServiceAuthorization> {
        service_authorization::get(id, self)
    }
    fn list_service_authorizations(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Vec<ServiceAuthorization>> {
        service_authorization::list(page, per_page, self)
    }
    fn update_service_authorization(
        &self,
        input: &UpdateServiceAuthorizationInput,
    ) -> Result<ServiceAuthorization> {
        service_authorization::update(input, self)
    }

    fn create_tls_activation(&self, input: &CreateTlsActivationInput) -> Result<TlsActivation> {
        tls_activation::create(input, self)
    }
    fn delete_tls_activation(&self, id: &str) -> Result<()> {
        tls_activation::delete(id, self)
    }
    fn get_tls_activation(&self, id: &str, include: Option<TlsInclude>) -> Result<TlsActivation> {
        tls_activation::get(id, include, self)
    }
    fn list_tls_activations(&self, input: &ListTlsActivationsInput) -> Result<Vec<TlsActivation>> {
        tls_activation::list(input, self)
    }
    fn update_tls_activation(&self, input: &UpdateTlsActivationInput) -> Result<TlsActivation> {
        tls_activation::update(input, self)
    }

    fn create_snippet(&self, input: &CreateSnippetInput) -> Result<Snippet> {
        snippet::create(input, self)
    }
    fn delete_snippet(&self, target: &NamedRef) -> Result<()> {
        snippet::delete(target, self)
    }
    fn get_snippet(&self, target: &NamedRef) -> Result<Snippet> {
        snippet::get(target, self)
    }
    fn get_dynamic_snippet(&self, service_id: &str, snippet_id: &str) -> Result<Snippet> {
        snippet::get_dynamic(service_id, snippet_id, self)
    }
    fn list_snippets(&self, version: &VersionRef) -> Result<Vec<Snippet>> {
        snippet::list(version, self)
    }
    fn update_snippet(&self, input: &UpdateSnippetInput) -> Result<Snippet> {
        snippet::update(input, self)
    }
    fn update_dynamic_snippet(&self, input: &UpdateDynamicSnippetInput) -> Result<Snippet> {
        snippet::update_dynamic(input, self)
    }

    fn create_logging(&self, input: &CreateLoggingInput) -> Result<LoggingEndpoint> {
        logging::create(input, self)
    }
    fn delete_logging(&self, kind: LoggingKind, target: &NamedRef) -> Result<()> {
        logging::delete(kind, target, self)
    }
    fn get_logging(&self, kind: LoggingKind, target: &NamedRef) -> Result<LoggingEndpoint> {
        logging::get(kind, target, self)
    }
    fn list_logging(&self, kind: LoggingKind, version: &VersionRef) -> Result<Vec<LoggingEndpoint>> {
        logging::list(kind, version, self)
    }
    fn update_logging(&self, input: &UpdateLoggingInput) -> Result<LoggingEndpoint> {
        logging::update(input, self)
    }
}
