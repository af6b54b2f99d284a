//! Error taxonomy for report fetching.
//!
//! Configuration problems are caught before any request is sent, transport
//! problems come from the request executor, and data problems surface while
//! the fetched rows are folded into a table.

use core::fmt::{self, Display, Formatter};
use core::time::Duration;

/// Reason codes the remote API uses for conditions that clear up on their own.
const RETRYABLE_REASONS: &[&str] = &["userRateLimitExceeded", "quotaExceeded", "internalServerError", "backendError"];

/// Synthetic reason code used when a page request exceeds its timeout.
pub const TIMEOUT_REASON: &str = "timeout";

/// Returns `true` if the remote reason code denotes a transient condition.
#[must_use]
pub fn is_retryable_reason(reason_code: &str) -> bool {
    reason_code == TIMEOUT_REASON || RETRYABLE_REASONS.contains(&reason_code)
}

/// A failure reported by the request executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    reason_code: String,
    message: String,
    status: Option<u16>,
    retryable: bool,
}

impl TransportError {
    /// Create an error whose retryability follows from its reason code.
    pub fn new(reason_code: impl Into<String>, message: impl Into<String>) -> Self {
        let reason_code = reason_code.into();
        let retryable = is_retryable_reason(&reason_code);

        Self {
            reason_code,
            message: message.into(),
            status: None,
            retryable,
        }
    }

    /// Create an error for a transient condition that has no remote reason code,
    /// such as a dropped connection.
    pub fn transient(reason_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            retryable: true,
            ..Self::new(reason_code, message)
        }
    }

    /// The error recorded when a page request runs past its deadline.
    #[must_use]
    pub fn timeout(after: Duration) -> Self {
        Self::new(TIMEOUT_REASON, format!("request timed out after {}ms", after.as_millis()))
    }

    /// Attach the HTTP status code the error arrived with.
    #[must_use]
    pub fn with_status(self, status: u16) -> Self {
        Self {
            status: Some(status),
            ..self
        }
    }

    #[must_use]
    pub fn reason_code(&self) -> &str {
        &self.reason_code
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.retryable
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {status}): {}", self.reason_code, self.message),
            None => write!(f, "{}: {}", self.reason_code, self.message),
        }
    }
}

impl core::error::Error for TransportError {}

/// A returned row that doesn't fit the requested shape, or a value that isn't numeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataError {
    /// Zero-based row index across all fetched pages, if the problem is tied to a row.
    pub row: Option<usize>,

    /// Column or key component involved.
    pub field: Option<String>,

    /// The offending wire value.
    pub value: Option<String>,

    pub message: String,
}

impl DataError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            row: None,
            field: None,
            value: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn at_row(self, row: usize) -> Self {
        Self { row: Some(row), ..self }
    }

    #[must_use]
    pub fn in_field(self, field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_value(self, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..self
        }
    }
}

impl Display for DataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(row) = self.row {
            write!(f, " at row {row}")?;
        }

        if let Some(field) = &self.field {
            write!(f, " in '{field}'")?;
        }

        if let Some(value) = &self.value {
            write!(f, " (value: {value:?})")?;
        }

        Ok(())
    }
}

impl core::error::Error for DataError {}

/// The single terminal error of a report request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// The declared metrics, dimensions, orderings, or parameters are invalid.
    Configuration(String),

    /// The remote service rejected the request with a non-retryable error.
    Transport(TransportError),

    /// A page kept failing with retryable errors until the attempt cap was reached.
    RetriesExhausted {
        /// One-based page number.
        page: usize,
        attempts: u32,
        last: TransportError,
    },

    /// The response could not be folded into a table.
    Data(DataError),

    /// The caller cancelled the fetch while a request or backoff was pending.
    Cancelled,
}

impl ReportError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(message) => write!(f, "invalid report configuration: {message}"),
            Self::Transport(e) => write!(f, "report request failed: {e}"),
            Self::RetriesExhausted { page, attempts, last } => {
                write!(f, "giving up on page {page} after {attempts} attempts: {last}")
            }
            Self::Data(e) => write!(f, "malformed report data: {e}"),
            Self::Cancelled => write!(f, "report request was cancelled"),
        }
    }
}

impl core::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Transport(e) | Self::RetriesExhausted { last: e, .. } => Some(e),
            Self::Data(e) => Some(e),
            Self::Configuration(_) | Self::Cancelled => None,
        }
    }
}

impl From<DataError> for ReportError {
    fn from(e: DataError) -> Self {
        Self::Data(e)
    }
}
