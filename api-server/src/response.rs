use actix_web::{http::StatusCode, HttpResponse};
use pew_core::SubmissionError;

/// `{success: false, error, error_code?}` with the given status.
pub(crate) fn json_error_with_code(
    status: StatusCode,
    message: impl Into<String>,
    error_code: Option<&str>,
) -> HttpResponse {
    let mut body = serde_json::json!({
        "success": false,
        "error": message.into(),
    });
    if let Some(code) = error_code {
        body["error_code"] = serde_json::Value::String(code.to_string());
    }
    HttpResponse::build(status).json(body)
}

/// Every validator rejection is a 403 carrying the stage's reason string.
pub(crate) fn submission_rejected(err: SubmissionError) -> HttpResponse {
    json_error_with_code(StatusCode::FORBIDDEN, err.to_string(), Some(err.code()))
}

pub(crate) fn store_unavailable() -> HttpResponse {
    json_error_with_code(
        StatusCode::INTERNAL_SERVER_ERROR,
        "score store error",
        Some("internal_error"),
    )
}
