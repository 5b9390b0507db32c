//! JSON body extraction with validation.
//!
//! Every way a body can be unusable ends up as an [`AppError`], so clients
//! always get `{"error": "..."}`:
//!
//! - missing or non-JSON `Content-Type`, bad syntax, wrong field types and
//!   missing fields are 400;
//! - bodies that parse but fail `validator` rules are 422.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, OptionalFromRequest, Request, rejection::JsonRejection},
    http::{StatusCode, header::CONTENT_TYPE},
};
use keystone_core::errors::AppError;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

pub(crate) fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

fn missing_field(body_text: &str) -> Option<&str> {
    body_text
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    let message = match &rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Missing 'Content-Type: application/json' header".to_string()
        }
        JsonRejection::JsonDataError(_) => {
            let text = rejection.body_text();
            match missing_field(&text) {
                Some(field) => format!("{} is required", field),
                None => "Invalid field type in request".to_string(),
            }
        }
        JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON".to_string(),
        _ => "Invalid request body".to_string(),
    };
    AppError::new(StatusCode::BAD_REQUEST, anyhow!(message))
}

/// `Json<T>` that also runs `T`'s validation rules.
///
/// As `Option<ValidatedJson<T>>` it yields `None` for a request without a
/// `Content-Type` header, for endpoints whose body is optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = <Json<T> as FromRequest<S>>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        value.validate().map_err(|errors| {
            AppError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                anyhow!("{}", format_errors(&errors)),
            )
        })?;

        Ok(ValidatedJson(value))
    }
}

impl<T, S> OptionalFromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        if !req.headers().contains_key(CONTENT_TYPE) {
            return Ok(None);
        }
        <Self as FromRequest<S>>::from_request(req, state)
            .await
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct NodeBody {
        #[validate(length(min = 1, message = "node_id must not be empty"))]
        node_id: String,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn extract(req: Request) -> Result<ValidatedJson<NodeBody>, AppError> {
        <ValidatedJson<NodeBody> as FromRequest<()>>::from_request(req, &()).await
    }

    async fn extract_optional(req: Request) -> Result<Option<ValidatedJson<NodeBody>>, AppError> {
        <ValidatedJson<NodeBody> as OptionalFromRequest<()>>::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_valid_body() {
        let ValidatedJson(body) = extract(json_request(r#"{"node_id": "role"}"#))
            .await
            .unwrap();
        assert_eq!(body.node_id, "role");
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let err = extract(json_request("{}")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), "node_id is required");
    }

    #[tokio::test]
    async fn test_syntax_error_is_bad_request() {
        let err = extract(json_request("{node_id")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"node_id": "role"}"#))
            .unwrap();
        let err = extract(req).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_failed_rule_is_unprocessable() {
        let err = extract(json_request(r#"{"node_id": ""}"#)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error.to_string(), "node_id must not be empty");
    }

    #[tokio::test]
    async fn test_optional_without_body() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::empty())
            .unwrap();
        assert!(extract_optional(req).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_optional_with_bad_body_still_rejects() {
        let err = extract_optional(json_request("{}")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
