use actix_web::{http::StatusCode, HttpResponse};

/// Every failure leaving this service carries the same JSON envelope:
/// `{ success: false, error, error_code }`.
pub(crate) fn json_error(
    status: StatusCode,
    message: impl Into<String>,
    error_code: &str,
) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "success": false,
        "error": message.into(),
        "error_code": error_code,
    }))
}
