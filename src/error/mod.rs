mod cli;
mod metadata;

pub use cli::EdgeCliError;
pub use metadata::{EdgeErrorCode, EdgeErrorKind, EdgeErrorMetadata, EdgeErrorSuggestion};

pub type EdgeResult<T> = std::result::Result<T, EdgeError>;

use calm_io::stderr;
use edgectl_std::Style;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use std::borrow::BorrowMut;
use std::fmt::{self, Debug, Display};
use std::io;

/// A specialized `Error` type for edgectl that wraps `anyhow`
/// and provides some extra `Metadata` for end users depending
/// on the specific error they encountered.
#[derive(Serialize, Debug)]
pub struct EdgeError {
    #[serde(flatten, serialize_with = "serialize_anyhow")]
    error: anyhow::Error,

    #[serde(flatten)]
    metadata: EdgeErrorMetadata,
}

fn serialize_anyhow<S>(error: &anyhow::Error, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut data = serializer.serialize_struct("error", 1)?;
    data.serialize_field("message", &format!("{error:#}"))?;
    data.end()
}

impl EdgeError {
    pub fn new<E>(error: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        let mut error = error.into();
        let metadata = EdgeErrorMetadata::from(error.borrow_mut());

        Self { error, metadata }
    }

    pub fn set_suggestion(&mut self, suggestion: EdgeErrorSuggestion) {
        self.metadata.suggestion = Some(suggestion);
    }

    pub fn with_suggestion(mut self, suggestion: EdgeErrorSuggestion) -> Self {
        self.set_suggestion(suggestion);
        self
    }

    pub fn suggestion(&self) -> Option<EdgeErrorSuggestion> {
        self.metadata.suggestion.clone()
    }

    /// The error message followed by its chain of causes.
    pub fn message(&self) -> String {
        format!("{:#}", self.error)
    }

    pub fn code(&self) -> Option<EdgeErrorCode> {
        self.metadata.code.clone()
    }

    pub fn kind(&self) -> EdgeErrorKind {
        self.metadata.kind
    }

    pub fn print(&self) -> io::Result<()> {
        stderr!("{}", self)?;
        Ok(())
    }

    pub fn get_json(&self) -> Value {
        json!(self)
    }
}

impl Display for EdgeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let error_descriptor_message = if let Some(code) = &self.metadata.code {
            format!("error[{}]:", code)
        } else {
            "error:".to_string()
        };
        let error_descriptor = Style::ErrorPrefix.paint(&error_descriptor_message);

        if self.metadata.skip_printing_cause {
            writeln!(formatter, "{} {}", error_descriptor, &self.error)?;
        } else {
            writeln!(formatter, "{} {:?}", error_descriptor, &self.error)?;
        }

        if let Some(suggestion) = &self.metadata.suggestion {
            writeln!(formatter, "        {}", suggestion)?;
        }
        Ok(())
    }
}

impl<E: Into<anyhow::Error>> From<E> for EdgeError {
    fn from(error: E) -> Self {
        Self::new(error)
    }
}
