pub mod cli;
mod command;
mod error;
mod manifest;
mod options;
mod utils;

pub use cli::Edgectl;
pub use error::{
    EdgeCliError, EdgeError, EdgeErrorCode, EdgeErrorKind, EdgeErrorMetadata, EdgeErrorSuggestion, EdgeResult,
};
pub use utils::session::Session;
