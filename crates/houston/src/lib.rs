#![cfg_attr(
    not(test),
    deny(
        clippy::panic,
    )
)]

#![deny(missing_docs)]

//! Utilites for configuring the edgectl CLI tool.

mod config;
mod error;
mod profile;
mod settings;

pub use config::Config;
pub use error::HoustonProblem;
pub use settings::{Settings, DEFAULT_ENDPOINT};

pub use profile::mask_token;
/// Utilites for saving, loading, and deleting configuration profiles.
pub use profile::{Credential, CredentialOrigin, LoadOpts, Profile, ProfileData};
