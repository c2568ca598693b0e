//! Error types for browsing, navigating and extracting result pages.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::domain::{Field, ResultTable};

/// A request that cannot be turned into a [`crate::domain::ResultQuery`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Student identifier must not be empty")]
    BlankIdentifier,
}

/// Failure talking to the browser itself.
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("WebDriver error: {0}")]
    Driver(#[from] thirtyfour::error::WebDriverError),

    #[error("Browser session error: {0}")]
    Session(String),
}

impl BrowserError {
    pub fn session(message: impl fmt::Display) -> Self {
        Self::Session(message.to_string())
    }
}

/// Terminal failures. Any of these aborts the request; the browser session
/// has already been released by the time one reaches the caller.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Could not open a browser session: {0}")]
    SessionUnavailable(#[source] BrowserError),

    #[error("Could not load listing page {url}: {source}")]
    NavigationFailed { url: String, source: BrowserError },

    #[error("Student '{identifier}' not found in the listing")]
    IdentifierNotFound { identifier: String },

    #[error("Student '{identifier}' found but click failed. Error: {cause}")]
    RowInteractionFailed { identifier: String, cause: String },

    #[error("Student detail panel did not load properly within {}s", .timeout.as_secs())]
    DetailPanelNotReady { timeout: Duration },

    #[error("Could not read the rendered detail panel: {0}")]
    DocumentUnavailable(#[source] BrowserError),
}

/// Why a single label or table could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("label '{0}' not found")]
    LabelNotFound(String),

    #[error("label '{0}' has no value after it")]
    MissingValue(String),

    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

impl ExtractionError {
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }
}

/// Non-terminal failures, collected next to the extracted data rather than
/// returned through the error channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
    #[error("Failed to extract {field}: {source}")]
    Field { field: Field, source: ExtractionError },

    #[error("Failed to extract {table}: {source}")]
    Table {
        table: ResultTable,
        source: ExtractionError,
    },
}
