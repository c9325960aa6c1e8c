use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response envelope used by every endpoint.
///
/// Success bodies carry `data` and `state = 1` (some endpoints add a
/// `message`); failure bodies carry `state = 0` and `error_message`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub state: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            message: None,
            data: Some(data),
            state: 1,
            error_message: None,
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            data: Some(data),
            state: 1,
            error_message: None,
        }
    }

    /// Success envelope with a message but no payload (soft deletes).
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            data: None,
            state: 1,
            error_message: None,
        }
    }

    pub fn failure(error_message: impl Into<String>) -> Self {
        Self {
            message: None,
            data: None,
            state: 0,
            error_message: Some(error_message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::success(vec![1, 2, 3])).unwrap();
        assert_eq!(body["state"], 1);
        assert_eq!(body["data"], serde_json::json!([1, 2, 3]));
        assert!(body.get("error_message").is_none());
        assert!(body.get("message").is_none());
    }

    #[test]
    fn success_with_message_keeps_data() {
        let body =
            serde_json::to_value(ApiResponse::success_with_message(7, "Se creó correctamente."))
                .unwrap();
        assert_eq!(body["state"], 1);
        assert_eq!(body["data"], 7);
        assert_eq!(body["message"], "Se creó correctamente.");
    }

    #[test]
    fn message_only_envelope_has_no_data() {
        let body = serde_json::to_value(ApiResponse::<()>::message_only(
            "Se eliminó correctamente.",
        ))
        .unwrap();
        assert_eq!(body["state"], 1);
        assert_eq!(body["message"], "Se eliminó correctamente.");
        assert!(body.get("data").is_none());
    }

    #[test]
    fn failure_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::<()>::failure("boom")).unwrap();
        assert_eq!(body["state"], 0);
        assert_eq!(body["error_message"], "boom");
        assert!(body.get("data").is_none());
    }
}
