//! Todo resource and request/response bodies

use serde::{Deserialize, Serialize};

/// A todo item as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Store-assigned identifier (24-char hex string)
    pub id: String,
    /// Free-form text
    pub text: String,
    /// Caller-assigned position, used only for display ordering
    pub order: i64,
    /// Completion flag
    pub done: bool,
}

impl Todo {
    /// Attach an identifier to a payload
    pub fn from_payload(id: impl Into<String>, payload: TodoPayload) -> Self {
        Self {
            id: id.into(),
            text: payload.text,
            order: payload.order,
            done: payload.done,
        }
    }
}

/// Body of POST requests: every field except the identifier.
///
/// Missing fields fall back to the same defaults the browser client uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPayload {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub done: bool,
}

impl TodoPayload {
    pub fn new(text: impl Into<String>, order: i64, done: bool) -> Self {
        Self {
            text: text.into(),
            order,
            done,
        }
    }
}

/// Body of PUT requests. Only the fields present in the request change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

impl TodoUpdate {
    /// True when the request supplied no updatable field
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.order.is_none() && self.done.is_none()
    }

    /// Overwrite the supplied fields of `payload`, leaving the rest untouched
    pub fn apply_to(self, payload: &mut TodoPayload) {
        if let Some(text) = self.text {
            payload.text = text;
        }
        if let Some(order) = self.order {
            payload.order = order;
        }
        if let Some(done) = self.done {
            payload.done = done;
        }
    }
}

/// Error body returned with every non-2xx status produced by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_todo_serializes_with_id() {
        let todo = Todo::from_payload("4e971ed699b6bd4f08000001", TodoPayload::new("foo", 1, false));
        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(
            value,
            json!({"id": "4e971ed699b6bd4f08000001", "text": "foo", "order": 1, "done": false})
        );
    }

    #[test]
    fn test_payload_defaults_missing_fields() {
        let payload: TodoPayload = serde_json::from_str(r#"{"text":"only text"}"#).unwrap();
        assert_eq!(payload.text, "only text");
        assert_eq!(payload.order, 0);
        assert!(!payload.done);
    }

    #[test]
    fn test_payload_ignores_client_supplied_id() {
        let payload: TodoPayload =
            serde_json::from_str(r#"{"id":"abc","text":"bar","order":2,"done":true}"#).unwrap();
        assert_eq!(payload, TodoPayload::new("bar", 2, true));
    }

    #[test]
    fn test_payload_rejects_wrong_types() {
        let result: Result<TodoPayload, _> = serde_json::from_str(r#"{"order":"first"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_applies_only_supplied_fields() {
        let update: TodoUpdate = serde_json::from_str(r#"{"text":"bar"}"#).unwrap();
        assert!(!update.is_empty());

        let mut payload = TodoPayload::new("foo", 7, true);
        update.apply_to(&mut payload);
        assert_eq!(payload, TodoPayload::new("bar", 7, true));
    }

    #[test]
    fn test_update_without_fields_is_empty() {
        let update: TodoUpdate = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert!(update.is_empty());

        let mut payload = TodoPayload::new("foo", 7, true);
        update.apply_to(&mut payload);
        assert_eq!(payload, TodoPayload::new("foo", 7, true));
    }

    #[test]
    fn test_update_rejects_wrong_types() {
        let result: Result<TodoUpdate, _> = serde_json::from_str(r#"{"done":"yes"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_string(&ErrorResponse::new("Todo not found")).unwrap();
        assert_eq!(body, r#"{"error":"Todo not found"}"#);
    }
}
