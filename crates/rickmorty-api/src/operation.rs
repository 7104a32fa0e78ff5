//! `ApiOperation` - success/failure outcome of every client call.

use super::error::ApiError;

/// Outcome of a client operation.
///
/// Exactly one variant is active and it never changes after construction.
/// A `Failure` carries no partial value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum ApiOperation<T> {
    /// The call completed and produced a fully-formed value.
    Success(T),
    /// The call failed with a single cause.
    Failure(ApiError),
}

impl<T> ApiOperation<T> {
    /// Transforms the success value, leaving a failure untouched.
    ///
    /// `transform` is never invoked on `Failure`.
    pub fn map_success<R>(self, transform: impl FnOnce(T) -> R) -> ApiOperation<R> {
        match self {
            Self::Success(data) => ApiOperation::Success(transform(data)),
            Self::Failure(error) => ApiOperation::Failure(error),
        }
    }

    /// Runs `block` with the value when this is `Success`, then returns `self`.
    pub fn on_success(self, block: impl FnOnce(&T)) -> Self {
        if let Self::Success(ref data) = self {
            block(data);
        }
        self
    }

    /// Runs `block` with the cause when this is `Failure`, then returns `self`.
    pub fn on_failure(self, block: impl FnOnce(&ApiError)) -> Self {
        if let Self::Failure(ref error) = self {
            block(error);
        }
        self
    }

    /// Returns `true` for `Success`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for `Failure`.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Borrows the success value, if any.
    #[must_use]
    pub const fn success(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Borrows the failure cause, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&ApiError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Converts into a standard `Result` for use with `?`.
    ///
    /// # Errors
    ///
    /// Returns the failure cause when this is `Failure`.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(error) => Err(error),
        }
    }
}

impl<T> From<Result<T, ApiError>> for ApiOperation<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(error) => Self::Failure(error),
        }
    }
}
