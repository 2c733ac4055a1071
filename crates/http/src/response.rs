//! Success envelope shared by every route.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Outcome marker carried by every response body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

/// `{status, message?, data?}` body wrapper.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl Envelope<()> {
    /// Failure body with a human-readable message and no data.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// A successful response: status code plus enveloped body.
#[derive(Debug)]
pub struct ApiResponse<T> {
    status_code: StatusCode,
    envelope: Envelope<T>,
}

impl<T> ApiResponse<T> {
    /// 200 with `data`
    pub fn ok(data: T) -> Self {
        Self::with_status(StatusCode::OK, Some(data))
    }

    /// 201 with `data`
    pub fn created(data: T) -> Self {
        Self::with_status(StatusCode::CREATED, Some(data))
    }

    /// Attach a human-readable message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.envelope.message = Some(message.into());
        self
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    fn with_status(status_code: StatusCode, data: Option<T>) -> Self {
        Self {
            status_code,
            envelope: Envelope {
                status: Status::Success,
                message: None,
                data,
            },
        }
    }
}

impl ApiResponse<()> {
    /// 200 carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::OK, None).with_message(message)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code, Json(self.envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn created_carries_data_and_message() {
        let response = ApiResponse::created(json!({"bookId": "abc"}))
            .with_message("Book added successfully")
            .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            json!({
                "status": "success",
                "message": "Book added successfully",
                "data": {"bookId": "abc"}
            })
        );
    }

    #[tokio::test]
    async fn message_only_response_omits_data() {
        let response = ApiResponse::message("done").into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"status": "success", "message": "done"})
        );
    }

    #[test]
    fn fail_envelope_serializes_status_fail() {
        let body = serde_json::to_value(Envelope::fail("nope")).unwrap();
        assert_eq!(body, json!({"status": "fail", "message": "nope"}));
    }
}
