//! Shared validation helpers for inbound HTTP adapters.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, SearchCriteriaError};

/// Largest accepted JSON body, in bytes.
pub const JSON_BODY_LIMIT: usize = 16 * 1024;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    EmptyId,
    InvalidBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::EmptyId => "empty_id",
            ErrorCode::InvalidBody => "invalid_body",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

pub(crate) fn empty_id_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(
        field,
        ErrorCode::EmptyId.as_str(),
        format!("{field} must not be empty"),
    )
}

/// Reject blank path identifiers, returning the trimmed value otherwise.
pub(crate) fn require_id(value: &str, field: FieldName) -> Result<&str, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(empty_id_error(field));
    }
    Ok(trimmed)
}

impl From<SearchCriteriaError> for Error {
    fn from(err: SearchCriteriaError) -> Self {
        field_error(err.field(), err.code(), err.to_string())
    }
}

fn invalid_body_error(err: &JsonPayloadError) -> Error {
    Error::invalid_request("request body is not valid JSON for this endpoint").with_details(
        json!({
            "code": ErrorCode::InvalidBody.as_str(),
            "reason": err.to_string(),
        }),
    )
}

/// JSON extractor configuration shared by every API scope.
///
/// Malformed JSON, unknown properties and type mismatches all become
/// `400 invalid_request` with an `invalid_body` detail code.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err: JsonPayloadError, req: &HttpRequest| {
            debug!(path = req.path(), error = %err, "rejected request body");
            invalid_body_error(&err).into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_ids_are_rejected(#[case] raw: &str) {
        let err = require_id(raw, FieldName::new("id")).expect_err("blank id");
        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(err.details(), Some(&json!({"field": "id", "code": "empty_id"})));
    }

    #[test]
    fn ids_are_trimmed() {
        assert_eq!(require_id(" abc ", FieldName::new("id")), Ok("abc"));
    }

    #[test]
    fn search_errors_carry_field_and_code() {
        let err = Error::from(SearchCriteriaError::LimitOutOfRange);
        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({"field": "limit", "code": "limit_out_of_range"}))
        );
    }

    #[test]
    fn body_errors_carry_the_reason() {
        let err = invalid_body_error(&JsonPayloadError::ContentType);
        let details = err.details().expect("details");
        assert_eq!(details["code"], "invalid_body");
        assert!(details["reason"].as_str().is_some_and(|reason| !reason.is_empty()));
    }
}
