//! `ApiError` - the single failure cause carried by `ApiOperation::Failure`.

/// HTTP status returned by the API when a resource or filter has no match.
const NOT_FOUND: u16 = 404;

/// Failure cause for every client operation.
///
/// Callers only branch on success/failure; the variants exist so the
/// message can say what went wrong and so pagination can tell a
/// "nothing matched" 404 apart from a real failure.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum ApiError {
    /// Connectivity, timeout, or body read failure.
    Transport(String),
    /// The server answered with a non-2xx status.
    Status {
        /// HTTP status code.
        status: u16,
        /// Error text from the response body (or the raw body).
        message: String,
    },
    /// The payload did not match the expected shape or could not be mapped.
    Decode(String),
    /// A page within a multi-page fetch failed.
    Aggregation {
        /// 1-based page number that failed.
        page: u32,
        /// Underlying failure.
        cause: Box<Self>,
    },
}

impl ApiError {
    /// Builds a transport error from any displayable cause.
    pub fn transport(cause: impl std::fmt::Display) -> Self {
        Self::Transport(cause.to_string())
    }

    /// Builds a decode error from any displayable cause.
    pub fn decode(cause: impl std::fmt::Display) -> Self {
        Self::Decode(cause.to_string())
    }

    /// Wraps `cause` as the failure of page `page` in an aggregation.
    #[must_use]
    pub fn aggregation(page: u32, cause: Self) -> Self {
        Self::Aggregation {
            page,
            cause: Box::new(cause),
        }
    }

    /// Returns `true` for an HTTP 404 answer.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == NOT_FOUND)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "request failed: {message}"),
            Self::Status { status, message } => {
                write!(f, "Rick and Morty API error (HTTP {status}): {message}")
            }
            Self::Decode(message) => write!(f, "failed to decode response: {message}"),
            Self::Aggregation { page, cause } => write!(f, "page {page} failed: {cause}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Aggregation { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}
