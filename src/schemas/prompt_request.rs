use serde::Serialize;

/// Body of a chat submission: `{"prompt": "..."}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PromptRequest {
    pub prompt: String,
}

impl PromptRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_single_prompt_key() {
        let body = serde_json::to_string(&PromptRequest::new("2+2?")).unwrap();
        assert_eq!(body, r#"{"prompt":"2+2?"}"#);
    }

    #[test]
    fn empty_prompt_is_sent_as_is() {
        let body = serde_json::to_string(&PromptRequest::new("")).unwrap();
        assert_eq!(body, r#"{"prompt":""}"#);
    }
}
