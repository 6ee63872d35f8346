//! Contract errors for names and the node tree

use std::fmt;

use thiserror::Error;

/// Role of a contract failure, used by callers to tell failures apart
/// without looking at messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Precondition violated: the caller passed an invalid argument.
    IllegalArgument,
    /// Invariant violated: internal state is inconsistent.
    InvalidState,
    /// Postcondition violated: the operation produced a bad result.
    MethodFailed,
    /// A composite operation failed underneath; see the trigger.
    ServiceFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::IllegalArgument => "illegal argument",
            ErrorKind::InvalidState => "invalid state",
            ErrorKind::MethodFailed => "method failed",
            ErrorKind::ServiceFailure => "service failure",
        };
        f.write_str(s)
    }
}

/// Contract errors.
///
/// Every variant can carry a `trigger`: the error that caused it. Triggers form
/// a singly linked chain that is also reachable through
/// [`std::error::Error::source`].
#[derive(Error, Debug, Clone)]
pub enum NameError {
    #[error("illegal argument: {message}")]
    IllegalArgument {
        message: String,
        #[source]
        trigger: Option<Box<NameError>>,
    },

    #[error("index {index} out of bounds for {len} components")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("invalid state: {message}")]
    InvalidState {
        message: String,
        #[source]
        trigger: Option<Box<NameError>>,
    },

    #[error("method failed: {message}")]
    MethodFailed {
        message: String,
        #[source]
        trigger: Option<Box<NameError>>,
    },

    #[error("service failure: {message}")]
    ServiceFailure {
        message: String,
        #[source]
        trigger: Option<Box<NameError>>,
    },
}

/// Result type for name and tree operations.
pub type NameResult<T> = Result<T, NameError>;

impl NameError {
    pub fn illegal_argument(message: impl Into<String>) -> Self {
        NameError::IllegalArgument {
            message: message.into(),
            trigger: None,
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        NameError::InvalidState {
            message: message.into(),
            trigger: None,
        }
    }

    pub fn method_failed(message: impl Into<String>) -> Self {
        NameError::MethodFailed {
            message: message.into(),
            trigger: None,
        }
    }

    /// Wrap `trigger` as the cause of a service failure.
    pub fn service_failure(message: impl Into<String>, trigger: NameError) -> Self {
        NameError::ServiceFailure {
            message: message.into(),
            trigger: Some(Box::new(trigger)),
        }
    }

    /// Attach (or replace) the trigger of this error.
    ///
    /// `IndexOutOfBounds` has no message slot; it is first turned into an
    /// `IllegalArgument` carrying its rendered text.
    pub fn with_trigger(self, cause: NameError) -> Self {
        let cause = Some(Box::new(cause));
        match self {
            NameError::IllegalArgument { message, .. } => NameError::IllegalArgument {
                message,
                trigger: cause,
            },
            e @ NameError::IndexOutOfBounds { .. } => NameError::IllegalArgument {
                message: e.to_string(),
                trigger: cause,
            },
            NameError::InvalidState { message, .. } => NameError::InvalidState {
                message,
                trigger: cause,
            },
            NameError::MethodFailed { message, .. } => NameError::MethodFailed {
                message,
                trigger: cause,
            },
            NameError::ServiceFailure { message, .. } => NameError::ServiceFailure {
                message,
                trigger: cause,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            NameError::IllegalArgument { .. } | NameError::IndexOutOfBounds { .. } => {
                ErrorKind::IllegalArgument
            }
            NameError::InvalidState { .. } => ErrorKind::InvalidState,
            NameError::MethodFailed { .. } => ErrorKind::MethodFailed,
            NameError::ServiceFailure { .. } => ErrorKind::ServiceFailure,
        }
    }

    pub fn is_precondition(&self) -> bool {
        self.kind() == ErrorKind::IllegalArgument
    }

    pub fn trigger(&self) -> Option<&NameError> {
        match self {
            NameError::IllegalArgument { trigger, .. }
            | NameError::InvalidState { trigger, .. }
            | NameError::MethodFailed { trigger, .. }
            | NameError::ServiceFailure { trigger, .. } => trigger.as_deref(),
            NameError::IndexOutOfBounds { .. } => None,
        }
    }

    pub fn has_trigger(&self) -> bool {
        self.trigger().is_some()
    }

    /// Innermost error of the trigger chain (`self` when there is no trigger).
    pub fn root_cause(&self) -> &NameError {
        let mut current = self;
        while let Some(next) = current.trigger() {
            current = next;
        }
        current
    }

    /// Precondition check: `IllegalArgument` unless `condition` holds.
    pub fn ensure_argument(condition: bool, message: impl Into<String>) -> NameResult<()> {
        if condition {
            Ok(())
        } else {
            Err(Self::illegal_argument(message))
        }
    }

    /// Invariant check: `InvalidState` unless `condition` holds.
    pub fn ensure_state(condition: bool, message: impl Into<String>) -> NameResult<()> {
        if condition {
            Ok(())
        } else {
            Err(Self::invalid_state(message))
        }
    }

    /// Postcondition check: `MethodFailed` unless `condition` holds.
    pub fn ensure_method(condition: bool, message: impl Into<String>) -> NameResult<()> {
        if condition {
            Ok(())
        } else {
            Err(Self::method_failed(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn given_failed_condition_when_ensuring_then_kind_matches_role() {
        assert_eq!(
            NameError::ensure_argument(false, "x").unwrap_err().kind(),
            ErrorKind::IllegalArgument
        );
        assert_eq!(
            NameError::ensure_state(false, "x").unwrap_err().kind(),
            ErrorKind::InvalidState
        );
        assert_eq!(
            NameError::ensure_method(false, "x").unwrap_err().kind(),
            ErrorKind::MethodFailed
        );
        assert!(NameError::ensure_argument(true, "x").is_ok());
    }

    #[test]
    fn given_service_failure_when_inspecting_then_trigger_is_chained() {
        let err = NameError::service_failure("search failed", NameError::invalid_state("empty"));

        assert_eq!(err.kind(), ErrorKind::ServiceFailure);
        assert!(err.has_trigger());
        assert_eq!(err.trigger().unwrap().kind(), ErrorKind::InvalidState);
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "service failure: search failed");
    }

    #[test]
    fn given_index_error_when_inspecting_then_reports_precondition() {
        let err = NameError::IndexOutOfBounds { index: 4, len: 2 };
        assert!(err.is_precondition());
        assert!(!err.has_trigger());
        assert_eq!(err.to_string(), "index 4 out of bounds for 2 components");
    }

    #[test]
    fn given_nested_triggers_when_root_cause_then_returns_innermost() {
        let inner = NameError::invalid_state("inner");
        let middle = NameError::method_failed("middle").with_trigger(inner);
        let outer = NameError::service_failure("outer", middle);

        assert_eq!(outer.root_cause().kind(), ErrorKind::InvalidState);
        assert_eq!(outer.root_cause().to_string(), "invalid state: inner");
    }

    #[test]
    fn given_index_error_when_attaching_trigger_then_becomes_illegal_argument() {
        let err = NameError::IndexOutOfBounds { index: 1, len: 0 }
            .with_trigger(NameError::invalid_state("cause"));
        assert_eq!(err.kind(), ErrorKind::IllegalArgument);
        assert!(err.has_trigger());
    }
}
