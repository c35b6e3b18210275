//! Submission lifecycle

use uuid::Uuid;

/// Identifies one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    /// Creates a new random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the form is in its submit lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing in flight and nothing to report.
    #[default]
    Idle,
    /// A submission is awaiting the endpoint's verdict.
    Submitting(SubmissionId),
    /// The last submission was accepted; carries the endpoint's message.
    Succeeded(String),
    /// The last submission was rejected with per-field errors.
    Failed,
}

impl SubmissionState {
    /// Returns `true` while a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting(_))
    }

    /// Returns the success message of the last submission, if it succeeded.
    pub fn success_message(&self) -> Option<&str> {
        match self {
            Self::Succeeded(message) => Some(message),
            _ => None,
        }
    }
}
