//! Resolving which service, and which version of it, a command targets.

use std::fmt::{self, Display};
use std::io::Write;

use edgectl_client::operations::service::Version;
use edgectl_client::shared::VersionRef;

use crate::options::{ServiceOpt, VersionSelector};
use crate::utils::env::EdgeEnvKey;
use crate::utils::err_log::service_context;
use crate::utils::session::Session;
use crate::{EdgeCliError, EdgeResult};

/// Where a service id came from, shown in verbose output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceIdSource {
    Flag,
    NameLookup,
    Env,
    Manifest,
}

impl Display for ServiceIdSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceIdSource::Flag => write!(f, "--service-id"),
            ServiceIdSource::NameLookup => write!(f, "--service-name"),
            ServiceIdSource::Env => write!(f, "${}", EdgeEnvKey::ServiceId),
            ServiceIdSource::Manifest => write!(f, "edge.toml"),
        }
    }
}

/// Resolves a service id from, in order, `--service-id`, `--service-name`,
/// `$EDGECTL_SERVICE_ID` and the project manifest.
///
/// Failures are recorded in the session's error log.
pub fn service_id(session: &Session, opt: &ServiceOpt) -> EdgeResult<(String, ServiceIdSource)> {
    optional_service_id(session, opt)?
        .ok_or_else(|| session.record_with(EdgeCliError::MissingServiceId, service_context(None, None)))
}

/// Like [`service_id`], but no service id anywhere is not an error.
pub fn optional_service_id(session: &Session, opt: &ServiceOpt) -> EdgeResult<Option<(String, ServiceIdSource)>> {
    resolve_service_id(session, opt).map_err(|e| session.record_with(e, service_context(None, None)))
}

fn resolve_service_id(session: &Session, opt: &ServiceOpt) -> EdgeResult<Option<(String, ServiceIdSource)>> {
    if let Some(id) = opt.service_id.as_deref().filter(|id| !id.is_empty()) {
        return Ok(Some((id.to_string(), ServiceIdSource::Flag)));
    }
    if let Some(name) = opt.service_name.as_deref() {
        let service = session.api()?.search_service(name)?;
        tracing::debug!(%name, id = %service.id, "resolved service name");
        return Ok(Some((service.id, ServiceIdSource::NameLookup)));
    }
    if let Some(id) = session.env().get(EdgeEnvKey::ServiceId)?.filter(|id| !id.is_empty()) {
        return Ok(Some((id, ServiceIdSource::Env)));
    }
    if let Some(id) = session
        .manifest()?
        .and_then(|m| m.service_id)
        .filter(|id| !id.is_empty())
    {
        return Ok(Some((id, ServiceIdSource::Manifest)));
    }
    Ok(None)
}

pub fn display_service_id(out: &mut dyn Write, service_id: &str, source: ServiceIdSource) -> EdgeResult<()> {
    writeln!(out, "Service ID (via {source}): {service_id}")?;
    writeln!(out)?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ServiceDetailsOpts<'a> {
    pub service: &'a ServiceOpt,
    /// `None` selects the active version.
    pub version: Option<VersionSelector>,
    pub autoclone: bool,
    /// Reads may target active or locked versions; mutations may not.
    pub allow_active_locked: bool,
}

/// Resolves the service id and the version to operate on, cloning the
/// version first when it is not editable and `autoclone` is set.
///
/// Failures are recorded in the session's error log together with the
/// service id and version known at the time.
pub fn service_details(
    session: &Session,
    opts: &ServiceDetailsOpts<'_>,
    out: &mut dyn Write,
) -> EdgeResult<(String, Version)> {
    let (service_id, source) = service_id(session, opts.service)?;
    if session.verbose() {
        display_service_id(out, &service_id, source)?;
    }
    let version = target_version(
        session,
        &service_id,
        opts.version.unwrap_or(VersionSelector::Active),
        opts.autoclone,
        opts.allow_active_locked,
        out,
    )?;
    Ok((service_id, version))
}

/// Resolves the version of an already known service, cloning it first
/// when it is not editable and `autoclone` is set.
pub fn target_version(
    session: &Session,
    service_id: &str,
    selector: VersionSelector,
    autoclone: bool,
    allow_active_locked: bool,
    out: &mut dyn Write,
) -> EdgeResult<Version> {
    let record = |e: crate::EdgeError| session.record_with(e, service_context(Some(service_id), None));
    let api = session.api().map_err(record)?;
    let versions = api.list_versions(service_id).map_err(|e| record(e.into()))?;
    let version = select_version(service_id, &versions, selector).map_err(|e| record(e.into()))?;
    tracing::debug!(%service_id, version = version.number, %selector, "selected service version");

    if allow_active_locked || !(version.active || version.locked) {
        return Ok(version);
    }

    let context = service_context(Some(service_id), Some(version.number));
    if !autoclone {
        let state = if version.active { "active" } else { "locked" };
        let error = EdgeCliError::VersionNotEditable {
            service_id: service_id.to_string(),
            version: version.number,
            state,
        };
        return Err(session.record_with(error, context));
    }

    let cloned = api
        .clone_version(&VersionRef::new(service_id, version.number))
        .map_err(|e| session.record_with(e, context))?;
    if session.verbose() {
        writeln!(
            out,
            "Service version {} is not editable, so it was automatically cloned because --autoclone is enabled. Now operating on version {}.",
            version.number, cloned.number
        )?;
        writeln!(out)?;
    }
    Ok(cloned)
}

/// Picks the version `selector` names out of `versions`.
pub fn select_version(
    service_id: &str,
    versions: &[Version],
    selector: VersionSelector,
) -> Result<Version, EdgeCliError> {
    if versions.is_empty() {
        return Err(EdgeCliError::NoVersions {
            service_id: service_id.to_string(),
        });
    }
    let found = match selector {
        VersionSelector::Latest => versions.iter().max_by_key(|v| v.number),
        VersionSelector::Active => versions.iter().find(|v| v.active),
        VersionSelector::ActiveOrLatest => versions
            .iter()
            .find(|v| v.active)
            .or_else(|| versions.iter().max_by_key(|v| v.number)),
        VersionSelector::Number(n) => versions.iter().find(|v| v.number == n),
    };
    found.cloned().ok_or_else(|| match selector {
        VersionSelector::Number(version) => EdgeCliError::VersionNotFound {
            service_id: service_id.to_string(),
            version,
        },
        _ => EdgeCliError::NoActiveVersion {
            service_id: service_id.to_string(),
        },
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use edgectl_client::{EdgeClientError, MockEdgeApi};
    use mockall::predicate::eq;
    use rstest::rstest;
    use speculoos::prelude::*;

    use super::*;
    use crate::manifest::{Language, Manifest};
    use crate::utils::session::testing::{output, session_with};
    use crate::EdgeErrorCode;

    pub(crate) fn version(number: u32, active: bool, locked: bool) -> Version {
        Version {
            number,
            service_id: "svc".to_string(),
            active,
            locked,
            ..Default::default()
        }
    }

    fn history() -> Vec<Version> {
        vec![version(1, false, true), version(2, true, true), version(3, false, false)]
    }

    fn flag(id: &str) -> ServiceOpt {
        ServiceOpt {
            service_id: Some(id.to_string()),
            service_name: None,
        }
    }

    #[rstest]
    #[case(VersionSelector::Latest, 3)]
    #[case(VersionSelector::Active, 2)]
    #[case(VersionSelector::Number(1), 1)]
    #[case(VersionSelector::ActiveOrLatest, 2)]
    fn it_selects_versions(#[case] selector: VersionSelector, #[case] expected: u32) {
        let selected = select_version("svc", &history(), selector).unwrap();
        assert_that!(selected.number).is_equal_to(expected);
    }

    #[test]
    fn a_missing_version_number_is_an_error() {
        let result = select_version("svc", &history(), VersionSelector::Number(9));
        assert!(matches!(result, Err(EdgeCliError::VersionNotFound { .. })));
    }

    #[test]
    fn active_or_latest_falls_back_to_the_highest_number() {
        let versions = vec![version(1, false, true), version(5, false, false)];
        let selected = select_version("svc", &versions, VersionSelector::ActiveOrLatest).unwrap();
        assert_that!(selected.number).is_equal_to(5);
    }

    #[test]
    fn no_versions_is_an_error() {
        let result = select_version("svc", &[], VersionSelector::Latest);
        assert!(matches!(result, Err(EdgeCliError::NoVersions { .. })));
    }

    #[test]
    fn the_flag_wins_over_the_manifest() {
        let (session, _dir) = session_with(MockEdgeApi::new(), false);
        let mut manifest = Manifest::new("app", Language::Rust);
        manifest.service_id = Some("from-manifest".to_string());
        manifest.save(&session.manifest_path()).unwrap();

        let (id, source) = service_id(&session, &flag("from-flag")).unwrap();
        assert_that!(id.as_str()).is_equal_to("from-flag");
        assert_that!(source).is_equal_to(ServiceIdSource::Flag);

        let (id, source) = service_id(&session, &ServiceOpt::default()).unwrap();
        assert_that!(id.as_str()).is_equal_to("from-manifest");
        assert_that!(source).is_equal_to(ServiceIdSource::Manifest);
    }

    #[test]
    fn the_name_is_looked_up() {
        let mut mock = MockEdgeApi::new();
        mock.expect_search_service()
            .with(eq("web"))
            .times(1)
            .returning(|_| {
                Ok(edgectl_client::operations::service::Service {
                    id: "abc".to_string(),
                    name: "web".to_string(),
                    ..Default::default()
                })
            });
        let (session, _dir) = session_with(mock, false);
        let opt = ServiceOpt {
            service_id: None,
            service_name: Some("web".to_string()),
        };
        let (id, source) = service_id(&session, &opt).unwrap();
        assert_that!(id.as_str()).is_equal_to("abc");
        assert_that!(source).is_equal_to(ServiceIdSource::NameLookup);
    }

    #[test]
    fn no_service_id_anywhere_is_recorded() {
        let (session, _dir) = session_with(MockEdgeApi::new(), false);
        let error = service_id(&session, &ServiceOpt::default()).unwrap_err();
        assert_that!(error.code()).is_equal_to(Some(EdgeErrorCode::E017));
        assert_that!(session.err_log().len()).is_equal_to(1);
    }

    #[test]
    fn an_active_version_is_cloned_with_autoclone() {
        let mut mock = MockEdgeApi::new();
        mock.expect_list_versions().times(1).returning(|_| Ok(history()));
        mock.expect_clone_version()
            .withf(|v| v.service_id == "svc" && v.service_version == 2)
            .times(1)
            .returning(|_| Ok(version(4, false, false)));
        let (session, _dir) = session_with(mock, true);
        let service = flag("svc");
        let opts = ServiceDetailsOpts {
            service: &service,
            version: Some(VersionSelector::Active),
            autoclone: true,
            allow_active_locked: false,
        };

        let mut out = Vec::new();
        let (id, version) = service_details(&session, &opts, &mut out).unwrap();
        assert_that!(id.as_str()).is_equal_to("svc");
        assert_that!(version.number).is_equal_to(4);
        let written = output(out);
        assert_that!(written).contains("Service ID (via --service-id): svc");
        assert_that!(written).contains("Now operating on version 4");
    }

    #[test]
    fn a_locked_version_without_autoclone_fails_closed() {
        let mut mock = MockEdgeApi::new();
        mock.expect_list_versions().times(1).returning(|_| Ok(history()));
        mock.expect_clone_version().never();
        let (session, _dir) = session_with(mock, false);
        let service = flag("svc");
        let opts = ServiceDetailsOpts {
            service: &service,
            version: Some(VersionSelector::Number(1)),
            autoclone: false,
            allow_active_locked: false,
        };

        let error = service_details(&session, &opts, &mut Vec::new()).unwrap_err();
        assert_that!(error.code()).is_equal_to(Some(EdgeErrorCode::E019));
        let records = session.err_log().records();
        assert_that!(records[0].context.get("Service ID")).is_equal_to(Some(&"svc".to_string()));
        assert_that!(records[0].context.get("Service Version")).is_equal_to(Some(&"1".to_string()));
    }

    #[test]
    fn reads_may_target_locked_versions() {
        let mut mock = MockEdgeApi::new();
        mock.expect_list_versions().times(1).returning(|_| Ok(history()));
        let (session, _dir) = session_with(mock, false);
        let service = flag("svc");
        let opts = ServiceDetailsOpts {
            service: &service,
            version: Some(VersionSelector::Number(1)),
            autoclone: false,
            allow_active_locked: true,
        };
        let (_, version) = service_details(&session, &opts, &mut Vec::new()).unwrap();
        assert_that!(version.number).is_equal_to(1);
    }

    #[test]
    fn remote_failures_are_recorded_with_the_service_id() {
        let mut mock = MockEdgeApi::new();
        mock.expect_list_versions().times(1).returning(|_| {
            Err(EdgeClientError::Unauthorized { status: 401 })
        });
        let (session, _dir) = session_with(mock, false);
        let service = flag("svc");
        let opts = ServiceDetailsOpts {
            service: &service,
            version: None,
            autoclone: false,
            allow_active_locked: false,
        };
        assert_that!(service_details(&session, &opts, &mut Vec::new())).is_err();
        let records = session.err_log().records();
        assert_that!(records).has_length(1);
        assert_that!(records[0].context.get("Service ID")).is_equal_to(Some(&"svc".to_string()));
    }
}
