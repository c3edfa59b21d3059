mod output;
mod profile;
mod service;

pub(crate) use output::JsonOpt;
pub(crate) use profile::ProfileOpt;
pub(crate) use service::{AutoCloneOpt, OptionalVersionOpt, ServiceOpt, VersionOpt, VersionSelector};
