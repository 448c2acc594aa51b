//! Error types for the PubMed industry-affiliation pipeline.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

/// Errors from the E-utilities HTTP client layer.
///
/// Any of these aborts the whole query; no partial results are returned.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint URL could not be built
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// Response envelope is not well-formed XML
    #[error("Failed to parse XML response: {0}")]
    Xml(#[from] DocumentError),

    /// Rate limited by NCBI (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// HTTP status code carried by this error, if it came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::BadRequest { .. } => Some(400),
            Self::Server { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors while building an XML document tree.
#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    /// Tokenizer error from quick-xml
    #[error(transparent)]
    Syntax(#[from] quick_xml::Error),

    /// Input ended while an element was still open
    #[error("element <{0}> is never closed")]
    Unclosed(String),

    /// Closing tag without a matching opening tag
    #[error("unexpected closing tag </{0}>")]
    UnexpectedEnd(String),

    /// Input contains no element at all
    #[error("document has no root element")]
    Empty,
}

/// Expected malformations of a single article record.
///
/// These never escape a batch parse; the offending record is set aside and
/// the rest of the batch continues.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A field the record cannot exist without is absent or blank.
    #[error("record is missing required field {0}")]
    MissingField(&'static str),
}

/// Errors while writing the CSV report.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    /// CSV encoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Output destination could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for single-record parsing.
pub type RecordResult<T> = Result<T, RecordError>;

/// Result type alias for report output.
pub type ReportResult<T> = Result<T, ReportError>;
