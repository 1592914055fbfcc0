#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Failure,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Idle => "IDLE",
            SubmissionStatus::Sending => "SENDING",
            SubmissionStatus::Success => "SUCCESS",
            SubmissionStatus::Failure => "FAILURE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        assert_eq!(SubmissionStatus::default(), SubmissionStatus::Idle);
        assert_eq!(SubmissionStatus::default().as_str(), "IDLE");
    }

    #[test]
    fn labels_are_upper_case() {
        assert_eq!(SubmissionStatus::Sending.as_str(), "SENDING");
        assert_eq!(SubmissionStatus::Failure.as_str(), "FAILURE");
    }
}
