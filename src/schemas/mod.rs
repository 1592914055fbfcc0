pub mod prompt_request;
pub mod prompt_response;
pub mod submission_status;
