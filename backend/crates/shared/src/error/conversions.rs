//! HTTP rendering of [`AppError`]

use serde::Serialize;

use super::app_error::AppError;
use super::kind::ErrorKind;

/// JSON body rendered for an [`AppError`]
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: ErrorKind,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'a str>,
}

impl<'a> From<&'a AppError> for ErrorBody<'a> {
    fn from(err: &'a AppError) -> Self {
        Self {
            error: err.kind(),
            message: err.message(),
            action: err.action(),
        }
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_shape() {
        let err = AppError::not_found("No such endpoint");
        let json = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(json["error"], "NOT_FOUND");
        assert_eq!(json["message"], "No such endpoint");
        assert!(json.get("action").is_none());

        let err = AppError::conflict("Already recorded").with_action("Nothing to do");
        let json = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(json["action"], "Nothing to do");
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_into_response_status() {
        use axum::response::IntoResponse;

        let response = AppError::gone("Session closed").into_response();
        assert_eq!(response.status().as_u16(), 410);
    }
}
