//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse for AppError` impl and the `ApiErrorResponse` body type
//! live in `incidenthub-core` (gated behind its `axum` feature) because the
//! orphan rule requires the impl to reside in the crate that defines
//! `AppError`. They are re-exported here so the API surface is unchanged.

pub use incidenthub_core::error::ApiErrorResponse;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use incidenthub_core::error::AppError;

    #[test]
    fn test_internal_detail_is_not_leaked() {
        let response = AppError::database("connection refused at 10.0.0.5").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_auth_failures_map_to_401_and_403() {
        assert_eq!(
            AppError::no_token().into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::expired_access().into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::password_expired().into_response().status(),
            StatusCode::FORBIDDEN
        );
    }
}
