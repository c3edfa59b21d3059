//! The service version a versioned resource command acts on.

use std::io::Write;

use edgectl_client::shared::VersionRef;

use crate::options::{ServiceOpt, VersionSelector};
use crate::utils::err_log::{service_context, ErrContext};
use crate::utils::service_details::{service_details, ServiceDetailsOpts};
use crate::utils::session::Session;
use crate::EdgeResult;

/// Reads may target active or locked versions. Writes may not, unless the
/// version is cloned first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Read,
    Write { autoclone: bool },
}

pub(crate) fn version_target(
    session: &Session,
    service: &ServiceOpt,
    version: VersionSelector,
    access: Access,
    out: &mut dyn Write,
) -> EdgeResult<VersionRef> {
    let (autoclone, allow_active_locked) = match access {
        Access::Read => (false, true),
        Access::Write { autoclone } => (autoclone, false),
    };
    let opts = ServiceDetailsOpts {
        service,
        version: Some(version),
        autoclone,
        allow_active_locked,
    };
    let (service_id, version) = service_details(session, &opts, out)?;
    Ok(VersionRef::new(service_id, version.number))
}

pub(crate) fn version_context(target: &VersionRef) -> ErrContext {
    service_context(Some(&target.service_id), Some(target.service_version))
}
