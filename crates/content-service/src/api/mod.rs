//! JSON API over the dataset
//!
//! Endpoints:
//! - `GET /api/users` (exposure policy)
//! - `GET /api/posts`
//! - `POST /api/posts` (sanitization policy)
//!
//! Both policies are selected per request by the `vulnerability` query flag,
//! see [`TrustMode`].

pub mod posts;
pub mod users;

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// Per-request trust boundary.
///
/// Only `?vulnerability=true` selects the vulnerable path. Any other value,
/// a missing flag, or a query string that fails to parse selects the safe one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrustMode {
    pub vulnerable: bool,
}

#[derive(Debug, Deserialize)]
struct TrustParams {
    vulnerability: Option<String>,
}

impl TrustMode {
    pub const SAFE: TrustMode = TrustMode { vulnerable: false };
    pub const VULNERABLE: TrustMode = TrustMode { vulnerable: true };

    /// Parse the raw flag value
    pub fn from_flag(value: Option<&str>) -> Self {
        Self {
            vulnerable: value == Some("true"),
        }
    }
}

impl<S> FromRequestParts<S> for TrustMode
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let flag = Query::<TrustParams>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(params)| params.vulnerability);
        Ok(Self::from_flag(flag.as_deref()))
    }
}

/// `{ status, data }` body for list endpoints
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub status: u16,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn ok(data: Vec<T>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            data,
        }
    }
}

/// `{ status, error }` body for failures
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field was missing or empty. Nothing was written.
    #[error("Invalid input.")]
    InvalidInput,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ApiError::InvalidInput => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Store(e) => {
                tracing::error!("Store failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                status: status.as_u16(),
                error,
            }),
        )
            .into_response()
    }
}
