//! JSON response envelope returned by every HTTP endpoint.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

/// An API response object: status code, reason phrase and either data or an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn reason(code: StatusCode) -> String {
    code.canonical_reason()
        .unwrap_or("unknown")
        .to_lowercase()
}

impl<T> ApiResponse<T> {
    /// Constructs a response with a status code of 200 carrying `data`.
    pub fn ok(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
        (
            StatusCode::OK,
            Json(Self {
                code: StatusCode::OK.as_u16(),
                message: reason(StatusCode::OK),
                data: Some(data),
                error: None,
            }),
        )
    }

    /// Constructs an error response with the given status code.
    pub fn error(code: StatusCode, error: impl Into<String>) -> (StatusCode, Json<ApiResponse<T>>) {
        (
            code,
            Json(Self {
                code: code.as_u16(),
                message: reason(code),
                data: None,
                error: Some(error.into()),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_response() {
        let (status, Json(body)) = ApiResponse::ok(vec!["en"]);

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::to_value(&body).expect("Should serialize"),
            json!({"code": 200, "message": "ok", "data": ["en"]})
        );
    }

    #[test]
    fn test_error_response() {
        let (status, Json(body)) = ApiResponse::<()>::error(StatusCode::NOT_FOUND, "language not found");

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            serde_json::to_value(&body).expect("Should serialize"),
            json!({"code": 404, "message": "not found", "error": "language not found"})
        );
    }
}
