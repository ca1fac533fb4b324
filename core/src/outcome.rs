//! The uniform result every call resolves to.

use crate::error::{ErrorInfo, ServiceError, TransportError};

/// Success payload or structured failure of one API call.
///
/// Calls never fail on their own; the failure is carried here until the
/// caller decides to propagate it with `into_result`.
#[derive(Debug, Clone)]
#[must_use]
pub enum Outcome<T> {
    Success(T),
    Failure(ErrorInfo),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn failure(self) -> Option<ErrorInfo> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(err) => Some(err),
        }
    }

    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(err) => Outcome::Failure(err.clone()),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(err) => Outcome::Failure(err),
        }
    }

    /// Unwrap the outcome: the payload on success, the structured error on
    /// failure, ready for `?`.
    pub fn into_result(self) -> Result<T, ErrorInfo> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(err) => Err(err),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, ErrorInfo> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

impl<T> From<ServiceError> for Outcome<T> {
    fn from(err: ServiceError) -> Self {
        Outcome::Failure(err.into())
    }
}

impl<T> From<TransportError> for Outcome<T> {
    fn from(err: TransportError) -> Self {
        Outcome::Failure(err.into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::{ErrorKind, TransportFault};

    fn service_failure() -> Outcome<String> {
        ServiceError::new(40001, "bad request").into()
    }

    #[test]
    fn success_unwraps_to_value() {
        let outcome = Outcome::Success("hello".to_string());
        assert!(outcome.is_success());
        assert_eq!(outcome.into_result().unwrap(), "hello");
    }

    #[test]
    fn service_failure_unwraps_to_structured_error() {
        let outcome = service_failure();
        assert!(outcome.is_failure());
        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Service);
        assert_eq!(err.code(), Some(40001));
        assert_eq!(err.message(), "bad request");
    }

    #[test]
    fn transport_failure_unwraps_without_code() {
        let outcome: Outcome<()> = TransportError {
            message: "unknown error occurred".to_string(),
            cause: Arc::new(TransportFault::Protocol("bad frame".to_string())),
        }
        .into();
        let err: Result<(), ErrorInfo> = outcome.into();
        let err = err.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.code(), None);
        assert_eq!(err.message(), "unknown error occurred");
    }

    #[test]
    fn map_keeps_failure_untouched() {
        let mapped = service_failure().map(|s| s.len());
        assert_eq!(mapped.failure().unwrap().code(), Some(40001));

        let mapped = Outcome::Success("four".to_string()).map(|s| s.len());
        assert_eq!(mapped.success(), Some(4));
    }

    #[test]
    fn as_ref_borrows_payload() {
        let outcome = Outcome::Success(vec![1, 2, 3]);
        assert_eq!(outcome.as_ref().map(Vec::len).success(), Some(3));
        assert!(outcome.is_success());
    }

    #[test]
    fn question_mark_propagates_failure() {
        fn caller() -> Result<usize, ErrorInfo> {
            let value = service_failure().into_result()?;
            Ok(value.len())
        }
        assert_eq!(caller().unwrap_err().message(), "bad request");
    }
}
