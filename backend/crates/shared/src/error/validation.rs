//! Request validation errors
//!
//! Produced by request-body validation before a use case runs. Carries every
//! violated rule, not just the first.

use thiserror::Error;

use super::kind::ErrorKind;

/// One or more request validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .messages.join("; "))]
pub struct RequestValidationError {
    messages: Vec<String>,
    code: u16,
}

impl RequestValidationError {
    pub fn new(messages: Vec<String>) -> Self {
        Self {
            messages,
            code: ErrorKind::ValidationError.status_code(),
        }
    }

    pub fn single(message: impl Into<String>) -> Self {
        Self::new(vec![message.into()])
    }

    pub fn with_code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn code(&self) -> u16 {
        self.code
    }
}

/// Collects rule violations while checking a payload
///
/// ```rust
/// use kernel::error::validation::Violations;
///
/// let mut v = Violations::new();
/// v.check(!"".is_empty(), "\"name\" is required");
/// assert!(v.finish().is_err());
/// ```
#[derive(Debug, Default)]
pub struct Violations {
    messages: Vec<String>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` unless `ok` holds
    pub fn check(&mut self, ok: bool, message: impl Into<String>) {
        if !ok {
            self.messages.push(message.into());
        }
    }

    /// Record the error message of a failed result
    pub fn capture<T, E: std::fmt::Display>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.messages.push(e.to_string());
                None
            }
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn finish(self) -> Result<(), RequestValidationError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(RequestValidationError::new(self.messages))
        }
    }

    /// Finish, yielding `value` when nothing was violated
    ///
    /// `value` is usually the zipped results of [`Violations::capture`]; it is
    /// `None` exactly when some capture recorded a violation.
    pub fn conclude<T>(self, value: Option<T>) -> Result<T, RequestValidationError> {
        match (self.messages.is_empty(), value) {
            (true, Some(value)) => Ok(value),
            (true, None) => Err(RequestValidationError::single("Invalid request payload")),
            (false, _) => Err(RequestValidationError::new(self.messages)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_code() {
        let err = RequestValidationError::single("\"email\" is required");
        assert_eq!(err.code(), 400);
        assert_eq!(err.messages(), ["\"email\" is required"]);
    }

    #[test]
    fn test_violations_keep_order() {
        let mut v = Violations::new();
        v.check(false, "first");
        v.check(true, "skipped");
        v.push("second");
        let err = v.finish().unwrap_err();
        assert_eq!(err.messages(), ["first", "second"]);
        assert_eq!(err.to_string(), "first; second");
    }

    #[test]
    fn test_capture() {
        let mut v = Violations::new();
        let ok: Option<i32> = v.capture("12".parse::<i32>());
        let bad: Option<i32> = v.capture("x".parse::<i32>());
        assert_eq!(ok, Some(12));
        assert_eq!(bad, None);
        assert!(v.finish().is_err());
    }

    #[test]
    fn test_empty_violations_pass() {
        assert!(Violations::new().finish().is_ok());
    }

    #[test]
    fn test_conclude() {
        let mut v = Violations::new();
        let a = v.capture("1".parse::<i32>());
        let b = v.capture("2".parse::<i32>());
        assert_eq!(v.conclude(a.zip(b)).unwrap(), (1, 2));

        let mut v = Violations::new();
        let a = v.capture("1".parse::<i32>());
        let b = v.capture("y".parse::<i32>());
        let err = v.conclude(a.zip(b)).unwrap_err();
        assert_eq!(err.messages().len(), 1);
    }
}
