use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Request error ({kind}): {source}")]
    Request {
        kind: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No element with id \"{0}\" in document")]
    MissingElement(String),
}

impl SubmitError {
    pub(crate) fn request(source: reqwest::Error) -> Self {
        let kind = if source.is_timeout() {
            "timeout"
        } else if source.is_connect() {
            "connection"
        } else {
            "other"
        };

        SubmitError::Request { kind, source }
    }
}
