//! Unified application error model and mapping helpers.
//! This module provides the error taxonomy used across the HTTP surface,
//! the identity gate and the promotion engine, along with the HTTP status
//! mapping and the JSON response shape (`{"message": ...}`, plus a
//! `fields` array for missing-field validation).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt::{Display, Formatter};

/// Authentication failures raised by the credential gate. Every variant
/// surfaces as HTTP 401; the distinctions exist for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("authorization header not found")]
    MissingHeader,
    #[error("token not found")]
    MissingToken,
    #[error("invalid token")]
    InvalidToken,
    #[error("token has expired")]
    Expired,
    #[error("user not found")]
    UserNotFound,
    #[error("please sign in again")]
    Unspecified,
}

#[derive(Debug)]
pub enum ApiError {
    /// Caller could not be authenticated (401).
    Auth(AuthError),
    /// Caller is known but does not own the listing (403).
    NotOwner,
    /// Referenced record does not exist (404).
    NotFound { what: &'static str },
    /// Required creation fields were absent (400); names are enumerated.
    MissingFields(Vec<&'static str>),
    /// Requested promotion type is not purchasable (400).
    InvalidPromotionType,
    /// Registration conflict on email (400).
    DuplicateEmail,
    /// Registration conflict on phone (400).
    DuplicatePhone,
    /// Login password did not match (400).
    InvalidPassword,
    /// Anything unexpected (500). The raw message is surfaced.
    Internal(String),
}

impl ApiError {
    pub fn listing_not_found() -> Self {
        ApiError::NotFound { what: "listing" }
    }

    pub fn user_not_found() -> Self {
        ApiError::NotFound { what: "user" }
    }

    /// Map to HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            ApiError::Auth(_) => 401,
            ApiError::NotOwner => 403,
            ApiError::NotFound { .. } => 404,
            ApiError::MissingFields(_)
            | ApiError::InvalidPromotionType
            | ApiError::DuplicateEmail
            | ApiError::DuplicatePhone
            | ApiError::InvalidPassword => 400,
            ApiError::Internal(_) => 500,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Auth(e) => e.to_string(),
            ApiError::NotOwner => "you are not allowed to perform this action".into(),
            ApiError::NotFound { what } => format!("{what} not found"),
            ApiError::MissingFields(_) => "required fields are missing".into(),
            ApiError::InvalidPromotionType => "invalid promotion type".into(),
            ApiError::DuplicateEmail => "this email address is already in use".into(),
            ApiError::DuplicatePhone => "this phone number is already in use".into(),
            ApiError::InvalidPassword => "invalid password".into(),
            ApiError::Internal(msg) => msg.clone(),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = match &self {
            ApiError::MissingFields(fields) => json!({
                "message": self.message(),
                "fields": fields,
            }),
            _ => json!({ "message": self.message() }),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
