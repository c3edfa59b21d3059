//! Resources provisioned when a package is first deployed to a new service.

mod dictionary;

pub use dictionary::Dictionaries;
