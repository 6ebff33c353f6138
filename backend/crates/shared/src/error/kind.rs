//! Error Kind - Classification of errors
//!
//! [`ErrorKind`] is the coarse, transport-level category of an [`AppError`].
//! Each kind maps to exactly one HTTP status code.
//!
//! [`AppError`]: super::app_error::AppError

use std::fmt;

use serde::Serialize;

/// Error classification shared by all bounded contexts.
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Gone.status_code(), 410);
/// assert_eq!(ErrorKind::Gone.reason(), "Gone");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Malformed input
    BadRequest,
    /// Caller identity missing or not verifiable
    Unauthorized,
    /// Caller is known but the action is not permitted
    Forbidden,
    NotFound,
    /// Conflicts with current state, e.g. a duplicate record
    Conflict,
    /// Resource existed but is no longer usable
    Gone,
    /// Well-formed but cannot be processed
    UnprocessableEntity,
    InternalServerError,
    ServiceUnavailable,
}

impl ErrorKind {
    const fn status_and_reason(self) -> (u16, &'static str) {
        match self {
            Self::BadRequest => (400, "Bad Request"),
            Self::Unauthorized => (401, "Unauthorized"),
            Self::Forbidden => (403, "Forbidden"),
            Self::NotFound => (404, "Not Found"),
            Self::Conflict => (409, "Conflict"),
            Self::Gone => (410, "Gone"),
            Self::UnprocessableEntity => (422, "Unprocessable Entity"),
            Self::InternalServerError => (500, "Internal Server Error"),
            Self::ServiceUnavailable => (503, "Service Unavailable"),
        }
    }

    pub const fn status_code(self) -> u16 {
        self.status_and_reason().0
    }

    /// Standard HTTP reason phrase
    pub const fn reason(self) -> &'static str {
        self.status_and_reason().1
    }

    /// 5xx kinds; always logged server-side
    pub const fn is_server_error(self) -> bool {
        self.status_code() >= 500
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let expected = [
            (ErrorKind::BadRequest, 400),
            (ErrorKind::Unauthorized, 401),
            (ErrorKind::Forbidden, 403),
            (ErrorKind::NotFound, 404),
            (ErrorKind::Conflict, 409),
            (ErrorKind::Gone, 410),
            (ErrorKind::UnprocessableEntity, 422),
            (ErrorKind::InternalServerError, 500),
            (ErrorKind::ServiceUnavailable, 503),
        ];
        for (kind, code) in expected {
            assert_eq!(kind.status_code(), code, "{kind}");
            assert_eq!(kind.is_server_error(), code >= 500);
        }
    }

    #[test]
    fn test_serialize_screaming_snake() {
        let json = serde_json::to_string(&ErrorKind::UnprocessableEntity).unwrap();
        assert_eq!(json, r#""UNPROCESSABLE_ENTITY""#);
    }
}
