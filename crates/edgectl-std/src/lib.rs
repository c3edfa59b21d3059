mod error;
mod fs;
mod style;
pub mod symbols;

pub mod print;
pub mod progress;
pub mod prompt;

pub use error::EdgeStdError;
pub use fs::Fs;
pub use progress::{Progress, Spinner, TextProgress};
pub use prompt::{LinePrompter, Prompter};
pub use style::is_no_color_set;
pub use style::Style;
pub use symbols::{failure_message, success_checkmark, success_message};
