//! Response envelope
//!
//! Every successful body is `{ "payload": <data> }`. Errors use the same
//! envelope with `{ "error": ... }` as the payload (see `AppError`).

use serde::Serialize;

/// `{ "payload": T }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload<T> {
    pub payload: T,
}

impl<T> Payload<T> {
    pub fn new(payload: T) -> Self {
        Self { payload }
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for Payload<T> {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self).into_response()
    }
}
