//! Tagged API failures.
//!
//! Every failed call is reduced to an [`ApiErrorKind`] plus whatever detail
//! the response body carried. Controllers decide the user-facing wording.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Error code the API uses for a unique-index violation (duplicate email).
pub const DUPLICATE_RECORD_CODE: i64 = 11000;

/// What went wrong with an API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// The server rejected the input (400/422 or per-field messages).
    ValidationFailed,
    /// The record already exists (code 11000).
    DuplicateRecord,
    /// The request never produced a response (connect, timeout, TLS).
    Network,
    /// Anything else, including bodies of an unexpected shape.
    Unknown,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ValidationFailed => "validation failed",
            Self::DuplicateRecord => "duplicate record",
            Self::Network => "network error",
            Self::Unknown => "unknown error",
        };
        f.write_str(label)
    }
}

/// Where a failed response keeps its user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageField {
    /// Only `error.message`. Register and login.
    Nested,
    /// `error.message`, else the top-level `message`. Product endpoints.
    NestedOrTopLevel,
}

/// Detail extracted from a failed response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorDetail {
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
    /// Structured error code (`error.code`).
    pub code: Option<i64>,
    /// Structured, user-presentable message (`error.message` or `message`).
    pub message: Option<String>,
    /// Per-field validation messages (`error.{field}: [..]`).
    pub field_errors: BTreeMap<String, Vec<String>>,
    /// Transport or decode failure description. Logged, never shown to users.
    pub cause: Option<String>,
}

impl ErrorDetail {
    fn summary(&self) -> String {
        match (&self.message, &self.cause, self.status) {
            (Some(message), _, _) => message.clone(),
            (None, Some(cause), _) => cause.clone(),
            (None, None, Some(status)) => format!("HTTP {status}"),
            (None, None, None) => "no detail".to_string(),
        }
    }
}

/// A failed API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {}", .detail.summary())]
pub struct ApiError {
    kind: ApiErrorKind,
    detail: ErrorDetail,
}

/// Result of an API call.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Build an error from its parts.
    #[must_use]
    pub const fn new(kind: ApiErrorKind, detail: ErrorDetail) -> Self {
        Self { kind, detail }
    }

    /// The failure category.
    #[must_use]
    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// Detail carried by the response, if any.
    #[must_use]
    pub const fn detail(&self) -> &ErrorDetail {
        &self.detail
    }

    /// A request that failed before a response arrived.
    pub(crate) fn transport(err: &reqwest::Error) -> Self {
        let kind = if err.is_decode() {
            ApiErrorKind::Unknown
        } else {
            ApiErrorKind::Network
        };
        Self::new(
            kind,
            ErrorDetail {
                status: err.status().map(|s| s.as_u16()),
                cause: Some(err.to_string()),
                ..ErrorDetail::default()
            },
        )
    }

    /// A request that could not be built locally.
    pub(crate) fn invalid_request(cause: String) -> Self {
        Self::new(
            ApiErrorKind::Unknown,
            ErrorDetail {
                cause: Some(cause),
                ..ErrorDetail::default()
            },
        )
    }

    /// A successful response whose body did not match the expected payload.
    pub(crate) fn decode(status: u16, err: &serde_json::Error) -> Self {
        Self::new(
            ApiErrorKind::Unknown,
            ErrorDetail {
                status: Some(status),
                cause: Some(err.to_string()),
                ..ErrorDetail::default()
            },
        )
    }

    /// Classify a non-success response from its status and raw body.
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        Self::from_response_with(status, body, MessageField::NestedOrTopLevel)
    }

    /// Classify a non-success response, reading the message from `messages`.
    #[must_use]
    pub fn from_response_with(status: u16, body: &[u8], messages: MessageField) -> Self {
        let Ok(json) = serde_json::from_slice::<Value>(body) else {
            return Self::new(
                ApiErrorKind::Unknown,
                ErrorDetail {
                    status: Some(status),
                    ..ErrorDetail::default()
                },
            );
        };

        let error = json.get("error");
        let code = error.and_then(|e| e.get("code")).and_then(parse_code);
        let message = error
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .or_else(|| match messages {
                MessageField::Nested => None,
                MessageField::NestedOrTopLevel => json.get("message").and_then(Value::as_str),
            })
            .filter(|m| !m.trim().is_empty())
            .map(str::to_owned);
        let field_errors = error.map(collect_field_errors).unwrap_or_default();

        let kind = if code == Some(DUPLICATE_RECORD_CODE) {
            ApiErrorKind::DuplicateRecord
        } else if !field_errors.is_empty() || matches!(status, 400 | 422) {
            ApiErrorKind::ValidationFailed
        } else {
            ApiErrorKind::Unknown
        };

        Self::new(
            kind,
            ErrorDetail {
                status: Some(status),
                code,
                message,
                field_errors,
                cause: None,
            },
        )
    }
}

/// Accept the code as a JSON number or a numeric string.
fn parse_code(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Entries of `error` whose value is a list of strings.
fn collect_field_errors(error: &Value) -> BTreeMap<String, Vec<String>> {
    let Some(map) = error.as_object() else {
        return BTreeMap::new();
    };

    map.iter()
        .filter_map(|(field, value)| {
            let messages: Vec<String> = value
                .as_array()?
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect();
            (!messages.is_empty()).then(|| (field.clone(), messages))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_code() {
        let err = ApiError::from_response(400, br#"{"error":{"code":11000}}"#);
        assert_eq!(err.kind(), ApiErrorKind::DuplicateRecord);
        assert_eq!(err.detail().code, Some(11000));
        assert_eq!(err.detail().message, None);
    }

    #[test]
    fn test_duplicate_code_with_extra_fields() {
        let body = br#"{"error":{"index":0,"code":11000,"keyValue":{"email":"a@b.com"}}}"#;
        let err = ApiError::from_response(500, body);
        assert_eq!(err.kind(), ApiErrorKind::DuplicateRecord);
    }

    #[test]
    fn test_duplicate_code_as_string() {
        let err = ApiError::from_response(409, br#"{"error":{"code":"11000"}}"#);
        assert_eq!(err.kind(), ApiErrorKind::DuplicateRecord);
    }

    #[test]
    fn test_structured_message() {
        let err = ApiError::from_response(401, br#"{"error":{"message":"Wrong password"}}"#);
        assert_eq!(err.kind(), ApiErrorKind::Unknown);
        assert_eq!(err.detail().message.as_deref(), Some("Wrong password"));
        assert_eq!(err.to_string(), "unknown error: Wrong password");
    }

    #[test]
    fn test_field_errors() {
        let body = br#"{
            "success": false,
            "message": "Validation failed",
            "error": {"price": ["must be positive"], "brand": ["is required", "too short"]}
        }"#;
        let err = ApiError::from_response(200, body);
        assert_eq!(err.kind(), ApiErrorKind::ValidationFailed);
        assert_eq!(err.detail().message.as_deref(), Some("Validation failed"));
        assert_eq!(err.detail().field_errors.len(), 2);
        assert_eq!(
            err.detail().field_errors.get("brand").unwrap(),
            &vec!["is required".to_owned(), "too short".to_owned()]
        );
    }

    #[test]
    fn test_bad_request_without_fields_is_validation() {
        let err = ApiError::from_response(422, br#"{"message":"bad input"}"#);
        assert_eq!(err.kind(), ApiErrorKind::ValidationFailed);
    }

    #[test]
    fn test_non_json_body() {
        let err = ApiError::from_response(502, b"<html>Bad Gateway</html>");
        assert_eq!(err.kind(), ApiErrorKind::Unknown);
        assert_eq!(err.detail().status, Some(502));
        assert!(err.detail().message.is_none());
        assert_eq!(err.to_string(), "unknown error: HTTP 502");
    }

    #[test]
    fn test_nested_only_ignores_top_level_message() {
        let body = br#"{"message":"Internal Server Error","error":{}}"#;
        let err = ApiError::from_response_with(500, body, MessageField::Nested);
        assert!(err.detail().message.is_none());

        let body = br#"{"message":"outer","error":{"message":"User not found"}}"#;
        let err = ApiError::from_response_with(404, body, MessageField::Nested);
        assert_eq!(err.detail().message.as_deref(), Some("User not found"));
    }

    #[test]
    fn test_blank_message_is_ignored() {
        let err = ApiError::from_response(500, br#"{"error":{"message":"  "}}"#);
        assert!(err.detail().message.is_none());
    }
}
