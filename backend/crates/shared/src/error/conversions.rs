//! Error conversions
//!
//! Rendering of [`AppError`] and [`Status`] as HTTP responses.

#[cfg(feature = "axum")]
use super::app_error::AppError;
#[cfg(feature = "axum")]
use crate::status::Status;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for Status {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        self.to_status().into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_error_renders_envelope() {
        let response = AppError::new(ErrorKind::NotFound, "Not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let status: Status = serde_json::from_slice(&body).unwrap();
        assert_eq!(status, Status::new(404, "Not found"));
    }

    #[test]
    fn test_status_keeps_its_code() {
        let response = Status::inserted().into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
