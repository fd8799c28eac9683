use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

/// The `{ success, message, data }` wrapper every endpoint responds with.
/// `data` is left out of failed responses.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Envelope<T> {
        Envelope {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Envelope<T> {
        Envelope {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

pub fn respond<T: Serialize>(status: StatusCode, message: &str, data: T) -> HttpResponse {
    HttpResponse::build(status).json(Envelope::success(message, data))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn success_carries_data() {
        let envelope = Envelope::success("Blog liked successfully!", json!({ "blogId": 7 }));

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "success": true, "message": "Blog liked successfully!", "data": { "blogId": 7 } })
        );
    }

    #[test]
    fn failure_omits_data() {
        let envelope = Envelope::<()>::failure("Blog not found");

        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"success":false,"message":"Blog not found"}"#
        );
    }
}
