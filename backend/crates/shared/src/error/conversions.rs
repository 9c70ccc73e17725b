//! Error conversions
//!
//! Axum response rendering in the `{ "payload": { "error": ... } }` envelope.

use super::app_error::AppError;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({
            "payload": { "error": self.error_body() },
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_into_response_uses_payload_envelope() {
        use axum::response::IntoResponse;

        let response = AppError::forbidden("role can't access resource").into_response();
        assert_eq!(response.status(), 403);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "payload": { "error": "role can't access resource" } })
        );
    }
}
