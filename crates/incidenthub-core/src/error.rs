//! Unified application error types for IncidentHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Authentication and authorization
//! failures additionally carry a machine-readable [`AuthCode`] that the API
//! layer serializes into the response body.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Authentication failed (missing, invalid, or expired token).
    Authentication,
    /// The caller does not have permission to perform the action.
    Authorization,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, concurrent modification).
    Conflict,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A storage I/O error occurred.
    Storage,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// Machine-readable codes for auth-specific failures.
///
/// Serialized verbatim into the error response body so that clients can
/// distinguish a missing token from an expired one without parsing the
/// human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AuthCode {
    /// No bearer token was supplied on a protected route.
    NoToken,
    /// The access token verified but has expired.
    ExpiredAccess,
    /// The access token failed verification against every candidate secret.
    InvalidAccess,
    /// The account password has expired and the route is not whitelisted.
    PasswordExpired,
}

impl AuthCode {
    /// Return the wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoToken => "NO_TOKEN",
            Self::ExpiredAccess => "EXPIRED_ACCESS",
            Self::InvalidAccess => "INVALID_ACCESS",
            Self::PasswordExpired => "PASSWORD_EXPIRED",
        }
    }
}

impl fmt::Display for AuthCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The unified application error used throughout IncidentHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Machine-readable code for auth-specific failures.
    pub code: Option<AuthCode>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Attach a machine-readable auth code.
    pub fn with_code(mut self, code: AuthCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Missing bearer token on a protected route.
    pub fn no_token() -> Self {
        Self::new(ErrorKind::Authentication, "Authentication token required")
            .with_code(AuthCode::NoToken)
    }

    /// Access token verified but expired.
    pub fn expired_access() -> Self {
        Self::new(ErrorKind::Authentication, "Access token has expired")
            .with_code(AuthCode::ExpiredAccess)
    }

    /// Access token failed verification against every candidate secret.
    pub fn invalid_access() -> Self {
        Self::new(ErrorKind::Authentication, "Invalid access token")
            .with_code(AuthCode::InvalidAccess)
    }

    /// Password expired and the route is not on the expiry whitelist.
    pub fn password_expired() -> Self {
        Self::new(
            ErrorKind::Authorization,
            "Password has expired and must be changed",
        )
        .with_code(AuthCode::PasswordExpired)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            code: self.code,
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

/// HTTP response mapping for [`AppError`].
///
/// This lives in `incidenthub-core` (rather than the API crate) because the
/// orphan rule requires the `IntoResponse` impl to reside in the crate that
/// defines `AppError`. It is gated behind the `axum` feature so crates that
/// don't need HTTP mapping avoid the axum dependency.
#[cfg(feature = "axum")]
mod http {
    use super::{AppError, ErrorKind};
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use serde::{Deserialize, Serialize};

    /// Standard API error response body.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ApiErrorResponse {
        /// Human-readable message.
        pub message: String,
        /// Machine-readable code for auth-specific failures.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub code: Option<String>,
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = match self.kind {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
                ErrorKind::Authorization => StatusCode::FORBIDDEN,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::Internal
                | ErrorKind::Database
                | ErrorKind::Storage
                | ErrorKind::Configuration
                | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
            };

            // Internal details never cross the boundary.
            let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
                tracing::error!(kind = %self.kind, error = %self.message, "Internal server error");
                "Internal server error".to_string()
            } else {
                self.message
            };

            let body = ApiErrorResponse {
                message,
                code: self.code.map(|c| c.as_str().to_string()),
            };

            (status, Json(body)).into_response()
        }
    }
}

#[cfg(feature = "axum")]
pub use http::ApiErrorResponse;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_code_wire_format() {
        assert_eq!(AuthCode::NoToken.as_str(), "NO_TOKEN");
        assert_eq!(AuthCode::ExpiredAccess.as_str(), "EXPIRED_ACCESS");
        assert_eq!(AuthCode::InvalidAccess.as_str(), "INVALID_ACCESS");
        assert_eq!(AuthCode::PasswordExpired.as_str(), "PASSWORD_EXPIRED");
    }

    #[test]
    fn test_auth_constructors_carry_codes() {
        assert_eq!(AppError::no_token().code, Some(AuthCode::NoToken));
        assert_eq!(AppError::no_token().kind, ErrorKind::Authentication);
        assert_eq!(
            AppError::password_expired().kind,
            ErrorKind::Authorization
        );
        assert!(AppError::not_found("x").code.is_none());
    }
}
