//! Send outcome reporting

use serde::{Deserialize, Serialize};

/// Terminal outcome of one accepted submission
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SendOutcome {
    /// The transport delivered the message
    Sent,

    /// The transport failed after accepting the submission
    Failed(String),

    /// The submission was cancelled before delivery
    Cancelled,
}

/// One completion record, keyed by the caller's correlation token
///
/// Exactly one record is produced per accepted submission, after the
/// submitting call has returned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// The correlation token the request was submitted with
    pub token: String,

    /// The outcome for that submission
    pub outcome: SendOutcome,
}

impl Completion {
    /// Create a completion record
    pub fn new(token: impl Into<String>, outcome: SendOutcome) -> Self {
        Self {
            token: token.into(),
            outcome,
        }
    }
}
