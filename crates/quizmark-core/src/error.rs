//! Session error types.
//!
//! Every rejected operation leaves the session exactly as it was. Callers can
//! tell recoverable validation failures from API misuse via [`SessionError::kind`]
//! without string matching.

use std::fmt;

use thiserror::Error;

use crate::session::Phase;

/// Session operations, named in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SubmitAnswer,
    OverrideResult,
    Advance,
    SubmitEarly,
    IntoOutcome,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::SubmitAnswer => write!(f, "submit_answer"),
            Operation::OverrideResult => write!(f, "override_result"),
            Operation::Advance => write!(f, "advance"),
            Operation::SubmitEarly => write!(f, "submit_early"),
            Operation::IntoOutcome => write!(f, "into_outcome"),
        }
    }
}

/// Broad class of a [`SessionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input or wrong phase; always recoverable.
    Validation,
    /// The caller broke the session's contract.
    Invariant,
}

/// Errors returned by [`crate::session::QuizSession`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The submitted answer is empty or whitespace.
    #[error("answer is empty")]
    EmptyAnswer,

    /// The operation is not valid in the current phase.
    #[error("{operation} is not allowed while {phase}")]
    InvalidState { operation: Operation, phase: Phase },

    /// Early submit needs at least one recorded answer.
    #[error("cannot submit early before answering any question")]
    NothingAnswered,

    /// An early-submit confirmation is waiting for confirm or cancel.
    #[error("early submit is awaiting confirmation")]
    ConfirmationPending,

    /// Confirm or cancel without a preceding request.
    #[error("no early submit was requested")]
    NoPendingConfirmation,

    /// Only free-text questions accept overrides.
    #[error("question {question_id} does not accept overrides")]
    OverrideNotAllowed { question_id: String },

    /// The current answer was already overridden once.
    #[error("answer to question {question_id} was already overridden")]
    AlreadyOverridden { question_id: String },

    /// A ledger mutation was attempted with no entries.
    #[error("answer ledger is empty")]
    EmptyLedger,

    /// The tracked score no longer matches the ledger.
    #[error("score drift: tracked {tracked}, ledger has {derived} correct")]
    ScoreDrift { tracked: usize, derived: usize },

    /// A session needs at least one question.
    #[error("question list is empty")]
    NoQuestions,

    #[error("start index {index} is out of range for {len} question(s)")]
    StartOutOfRange { index: usize, len: usize },
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::EmptyAnswer
            | SessionError::InvalidState { .. }
            | SessionError::NothingAnswered
            | SessionError::ConfirmationPending
            | SessionError::NoPendingConfirmation => ErrorKind::Validation,
            SessionError::OverrideNotAllowed { .. }
            | SessionError::AlreadyOverridden { .. }
            | SessionError::EmptyLedger
            | SessionError::ScoreDrift { .. }
            | SessionError::NoQuestions
            | SessionError::StartOutOfRange { .. } => ErrorKind::Invariant,
        }
    }

    /// Returns `true` for recoverable input or phase errors.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_errors() {
        assert!(SessionError::EmptyAnswer.is_validation());
        assert!(SessionError::InvalidState {
            operation: Operation::Advance,
            phase: Phase::Asking,
        }
        .is_validation());
        assert_eq!(SessionError::EmptyLedger.kind(), ErrorKind::Invariant);
        assert_eq!(
            SessionError::OverrideNotAllowed {
                question_id: "q1".into()
            }
            .kind(),
            ErrorKind::Invariant
        );
    }

    #[test]
    fn messages_name_operation_and_phase() {
        let err = SessionError::InvalidState {
            operation: Operation::Advance,
            phase: Phase::Asking,
        };
        assert_eq!(err.to_string(), "advance is not allowed while asking");
    }
}
