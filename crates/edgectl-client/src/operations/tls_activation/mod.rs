mod runner;
mod types;

pub use runner::{create, delete, get, list, update};
pub use types::*;
