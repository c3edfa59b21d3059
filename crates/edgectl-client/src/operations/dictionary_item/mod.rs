mod runner;
mod types;

pub use runner::{batch_modify, create, delete, get, list, update};
pub use types::*;
