// src/api/parser.rs
//! Turns captured upstream responses into JSON bodies or classified errors.
//!
//! Nothing here knows about envelope shapes; a successful parse only means
//! the body is JSON.

use super::client::ApiResponse;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, UpstreamErrorCode};
use serde_json::Value;

/// Parse any upstream response into a JSON value.
pub fn parse_json_response(result: ApiResponse<String>) -> Result<Value, AppError> {
    if !result.status.is_success() {
        let code = UpstreamErrorCode::from_http_status(result.status.as_u16());
        return Err(AppError::UpstreamStatus {
            code,
            status: result.status,
            url: result.url,
        });
    }

    serde_json::from_str(&result.data).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", result.url, e);
        AppError::MalformedResponse {
            reason: format!("{} (body: {})", e, preview(&result.data)),
            url: result.url,
        }
    })
}

/// First `ERROR_BODY_PREVIEW_LENGTH` characters of a body, for diagnostics.
fn preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn response(status: StatusCode, body: &str) -> ApiResponse<String> {
        ApiResponse {
            data: body.to_string(),
            status,
            url: "https://www.swapi.tech/api/films".to_string(),
        }
    }

    #[test]
    fn parses_successful_json() {
        let value = parse_json_response(response(StatusCode::OK, r#"{"result": []}"#)).unwrap();
        assert!(value.get("result").is_some());
    }

    #[test]
    fn non_success_status_is_classified() {
        let err = parse_json_response(response(StatusCode::NOT_FOUND, "not found")).unwrap_err();
        assert!(err.is_not_found());

        let err = parse_json_response(response(StatusCode::TOO_MANY_REQUESTS, "")).unwrap_err();
        match err {
            AppError::UpstreamStatus { code, .. } => assert_eq!(code, UpstreamErrorCode::RateLimited),
            other => panic!("expected UpstreamStatus, got {:?}", other),
        }
    }

    #[test]
    fn html_body_is_malformed() {
        let err = parse_json_response(response(StatusCode::OK, "<html>maintenance</html>"))
            .unwrap_err();
        match err {
            AppError::MalformedResponse { reason, .. } => assert!(reason.contains("<html>")),
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let body = "é".repeat(ERROR_BODY_PREVIEW_LENGTH + 5);
        let shown = preview(&body);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), ERROR_BODY_PREVIEW_LENGTH + 3);
    }
}
