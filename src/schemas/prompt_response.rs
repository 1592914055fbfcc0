use serde_json::Value;

/// Shown when the reply carries no usable `response` field.
pub const NO_ANSWER: &str = "No answer";

/// Reply of the chat endpoint. Any JSON document is accepted; only a
/// non-empty string under `response` counts as an answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptResponse {
    pub response: Option<String>,
}

impl PromptResponse {
    pub fn from_value(value: &Value) -> Self {
        let response = value
            .get("response")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        Self { response }
    }

    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(body)?;
        Ok(Self::from_value(&value))
    }

    pub fn display_text(&self) -> &str {
        self.response.as_deref().unwrap_or(NO_ANSWER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn picks_up_response_field() {
        let parsed = PromptResponse::from_slice(br#"{"response":"Hello"}"#).unwrap();
        assert_eq!(parsed.display_text(), "Hello");
    }

    #[test]
    fn missing_field_falls_back() {
        let parsed = PromptResponse::from_slice(b"{}").unwrap();
        assert_eq!(parsed.response, None);
        assert_eq!(parsed.display_text(), NO_ANSWER);
    }

    #[test]
    fn backend_error_object_has_no_answer() {
        let parsed = PromptResponse::from_value(&json!({"error": "No prompt provided"}));
        assert_eq!(parsed.display_text(), NO_ANSWER);
    }

    #[test]
    fn other_shapes_are_tolerated() {
        for value in [
            json!(null),
            json!([1, 2, 3]),
            json!("text"),
            json!({"response": 42}),
            json!({"response": ""}),
        ] {
            assert_eq!(PromptResponse::from_value(&value).display_text(), NO_ANSWER);
        }
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(PromptResponse::from_slice(b"<html>oops</html>").is_err());
    }
}
