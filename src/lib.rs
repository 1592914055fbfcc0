pub mod chat_client;
pub mod dom;
pub mod error;
pub mod schemas;
pub mod settings;
pub mod submitter;

pub use chat_client::{ChatClient, CHAT_ENDPOINT};
pub use dom::{Document, OutputSink, PromptSource, TextElement};
pub use error::SubmitError;
pub use settings::Settings;
pub use submitter::{OverlapPolicy, PromptSubmitter, SubmissionOutcome};
