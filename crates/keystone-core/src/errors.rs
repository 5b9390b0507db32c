//! Error types shared across Keystone.
//!
//! [`TreeError`] and [`CatalogError`] are returned by the permission tree and
//! catalog. [`AppError`] is the HTTP-facing error that handlers return.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Errors raised by permission tree construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Granted ids that do not name a leaf of the catalog.
    #[error("unknown permission ids: {}", .unknown.join(", "))]
    Validation { unknown: Vec<String> },

    /// A node id that is not part of the live tree.
    #[error("permission node not found: {0}")]
    NotFound(String),
}

/// Errors raised while loading or validating a permission catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("permission id must not be empty (label: {label:?})")]
    EmptyId { label: String },

    #[error("duplicate permission id in catalog: {0}")]
    DuplicateId(String),

    #[error("failed to read permission catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse permission catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::FORBIDDEN, err)
    }

    /// Maps a tree error onto the matching HTTP status.
    ///
    /// A missing toggle target means the client rendered a node the server
    /// does not know about, so it surfaces as 404 rather than 500.
    pub fn from_tree(err: TreeError) -> Self {
        match err {
            TreeError::NotFound(_) => Self::not_found(err),
            TreeError::Validation { .. } => Self::unprocessable(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_error_messages() {
        let err = TreeError::Validation {
            unknown: vec!["dept.archive".to_string(), "dept.purge".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown permission ids: dept.archive, dept.purge"
        );

        let err = TreeError::NotFound("role.export".to_string());
        assert_eq!(err.to_string(), "permission node not found: role.export");
    }

    #[test]
    fn test_from_tree_status_mapping() {
        let not_found = AppError::from_tree(TreeError::NotFound("x".to_string()));
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);

        let invalid = AppError::from_tree(TreeError::Validation { unknown: vec![] });
        assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_blanket_conversion_is_internal() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
