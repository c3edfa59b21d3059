mod runner;
mod types;

pub use runner::{create, delete, get, get_dynamic, list, update, update_dynamic};
pub use types::*;
